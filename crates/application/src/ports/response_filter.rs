#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Allow,
    Block,
}

impl FilterDecision {
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block)
    }
}
