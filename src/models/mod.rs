pub mod data;

pub use data::{CardData, CardInfo, CardScan, PublicProfile, UserRecord};
