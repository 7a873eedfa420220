pub mod market;
pub mod news_item;
