pub mod accounts;

pub use self::accounts::model::UserSummary;
