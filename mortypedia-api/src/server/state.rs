// Shared state handed to every handler
use std::sync::Arc;

use likes_repository::LikesService;

use crate::clients::{EntityMetadataSource, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub likes: Arc<LikesService>,
    pub metadata: Arc<dyn EntityMetadataSource>,
    pub text_generator: Arc<dyn TextGenerator>,
}
