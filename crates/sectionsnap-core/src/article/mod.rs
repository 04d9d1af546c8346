mod reader;

pub use reader::{Article, ArticleLibrary, FileReader};
