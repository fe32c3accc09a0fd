pub mod content_generation_service;
pub mod material_service;
pub mod model_service;
pub mod prompt_builder;
pub mod quiz_lifecycle_service;
pub mod response_extractor;
pub mod stats_service;
pub mod study_content_service;
