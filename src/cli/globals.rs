#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}
