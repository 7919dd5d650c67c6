mod key;
mod page;

pub use key::OptionKey;
pub use page::{Page, PageRequest, page_count};
