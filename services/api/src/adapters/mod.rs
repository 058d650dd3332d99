pub mod db;

pub use db::PgCommentStore;
