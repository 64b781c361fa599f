pub const RENDER_WIDTH: i32 = 1280;           // Initial window width
pub const RENDER_HEIGHT: i32 = 800;           // Initial window height
pub const FPS: u32 = 60;                      // Frames per second

pub const FADE_DELAY_MS: u64 = 150;           // Image swap happens this long after fade-out starts
pub const AUTO_ADVANCE_MS: u64 = 4000;        // Image slideshow auto-play period
pub const IMAGE_INITIAL_INDEX: usize = 8;     // Image slideshow opens on this slide

pub const FILTER_FADE_IN_DELAY_MS: u64 = 50;  // Shown project cards fade in after this
pub const FILTER_HIDE_DELAY_MS: u64 = 300;    // Filtered-out cards collapse after this
pub const BACK_TO_TOP_THRESHOLD: f32 = 300.0; // Scroll offset that reveals the button

pub const REVEAL_THRESHOLD: f32 = 0.1;        // Visible share that reveals a block
pub const TIMELINE_THRESHOLD: f32 = 0.3;      // Visible share that animates a timeline entry
pub const REVEAL_BOTTOM_MARGIN: f32 = 50.0;   // Viewport bottom pulled up this far for reveals
pub const REVEAL_STAGGER_MS: u64 = 100;       // Extra delay per project card

pub const SCROLL_SPY_OFFSET: f32 = 100.0;     // Reading line below the top of the viewport
pub const SCROLL_SPY_DEBOUNCE_MS: u64 = 10;   // Quiet time before the active dot updates

pub const CURSOR_SIZE: f32 = 20.0;            // Custom cursor diameter
pub const CURSOR_EASING: f32 = 0.1;           // Share of the gap closed per frame
pub const CURSOR_FRAME_MS: u64 = 16;          // Length of one easing frame
pub const CURSOR_SCROLL_IDLE_MS: u64 = 150;   // `scrolling` clears after this long without scrolls

pub const ACTIVE: &str = "active";
pub const PREV: &str = "prev";
pub const SHOW: &str = "show";
pub const REVEAL_PENDING: &str = "reveal-pending";
pub const REVEALED: &str = "revealed";
pub const ANIMATE: &str = "animate";
pub const HOVERING: &str = "hovering";
pub const SCROLLING: &str = "scrolling";
