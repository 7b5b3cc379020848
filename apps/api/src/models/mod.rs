pub mod collateral;
pub mod lesson;
pub mod module;
pub mod outcome;
