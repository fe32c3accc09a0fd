pub const SUMMARY_PROMPT: &str = "Please generate a concise and well-structured summary of the following study material.
The summary should capture all key concepts, main ideas, and important details.
Use clear headings and bullet points for better readability.";

pub const NOTES_PROMPT: &str = "Transform this study material into comprehensive study notes.
Organize the content with clear headings, subheadings, and bullet points.
Include definitions of key terms, important concepts, and relevant examples.
Make sure the notes are well-structured for effective studying.";

pub const FLASHCARDS_PROMPT: &str = "Create a set of flashcards (10-15 cards) from this study material.
For each flashcard, provide a clear question or term on the front,
and a concise, accurate answer or definition on the back.
Format your response as a JSON array where each element has 'front' and 'back' keys.";

pub const QUIZ_PROMPT: &str = "Generate a 10-question quiz based EXCLUSIVELY on the following study material.
Questions should directly test understanding of the key concepts in the material.
Include multiple choice questions with 4 options each.
Provide the correct answer for each question.
Format your response as a JSON array of objects with:
- question_text: The question
- options: Array of 4 options (one must be correct)
- answer: The correct answer

IMPORTANT:
- All questions must be directly based on the provided material
- Do not include general knowledge questions
- Focus on the most important concepts from the material";

pub const STUDY_MATERIAL_HEADER: &str = "Study Material:";
