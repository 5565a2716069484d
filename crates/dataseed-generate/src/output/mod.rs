pub mod csv;
pub mod json;

pub use self::csv::{read_users_csv, write_products_csv, write_users_csv};
pub use self::json::{read_titles_json, write_titles_json};
