pub(crate) mod clock;
pub(crate) mod frame_loop;
pub(crate) mod scene;
pub(crate) mod surface;
pub(crate) mod theme;
pub(crate) mod viewport;
