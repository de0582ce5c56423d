pub mod analysis;
pub mod feed;
pub mod locks;
pub mod markup;
pub mod parser;
pub mod report;
