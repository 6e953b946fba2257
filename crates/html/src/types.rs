#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        /// First occurrence fixes the position; a repeated name overwrites the value.
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    /// One character per token from the data state; the tree builder coalesces.
    Text(String),
    EndOfInput,
}

impl Token {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Token::EndOfInput)
    }
}
