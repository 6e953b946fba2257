pub const BLOCK_TEMPLATE: &str = "<div class=box><span>hello</span><img src=x/></div>";

pub const STYLE_PRELUDE: &str =
    "<style>div{display:flex;width:300px} .box span{width:120px} img{width:40px}</style>";

pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

/// `make_blocks` behind a stylesheet, so every block is styled.
pub fn make_styled_blocks(blocks: usize) -> String {
    let mut html = String::from(STYLE_PRELUDE);
    html.push_str(&make_blocks(blocks));
    html
}
