pub(crate) mod export;
pub(crate) mod interaction;
pub(crate) mod runner;
pub(crate) mod state;
