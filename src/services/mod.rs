pub mod dashboard;
pub mod demo;
pub mod lists;
pub mod meisterplan;
pub mod normalize;
pub mod portfolio;
pub mod search;
