pub mod models {
    pub mod disclosure;
    pub mod document;
}
pub mod db {
    pub mod repository;
}
pub mod clock;
pub mod demo_seeder;
pub mod disclosure;
pub mod error;
pub mod registry;
pub mod wizards;

#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod api {
    pub mod disclosures;
    pub mod documents;
    pub mod errors;
}
