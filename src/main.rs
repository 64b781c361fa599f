use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;
mod texture_loader;

use carousel::build_page;
use carousel::config::CarouselConfig;
use carousel::constants::*;
use carousel::document::ElementId;
use carousel::error::CarouselError;
use carousel::event::{Key, PageEvent};

use crate::render::draw_page;
use crate::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};

const SCROLL_STEP: f32 = 60.0;

/// Portfolio page with a photo slideshow, persona cards and a project filter.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the slideshow photos
    image_directory: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slide shown first (0-based)
    #[arg(long)]
    initial_index: Option<usize>,

    /// Auto-advance period of the photo slideshow in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Enables auto-advance on the persona cards with this period
    #[arg(long)]
    persona_interval_ms: Option<u64>,
}

fn load_config(args: &Args) -> Result<CarouselConfig> {
    let mut config = match &args.config {
        Some(path) => CarouselConfig::load(path)?,
        None => CarouselConfig::default(),
    };
    if let Some(index) = args.initial_index {
        config.slideshow.initial_index = index;
    }
    if let Some(interval) = args.interval_ms {
        config.slideshow.auto_advance_ms = interval;
    }
    if args.persona_interval_ms.is_some() {
        config.persona.auto_advance_ms = args.persona_interval_ms;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = load_config(&args)?;
    info!(directory = %args.image_directory.display(), "starting");

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Portfolio Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let mut textures: HashMap<String, Texture2D> = HashMap::new();
    let mut images: Vec<String> = Vec::new();
    match load_sorted_image_paths(&args.image_directory) {
        Ok(paths) => {
            for path in paths {
                match load_texture_with_exif_rotation(&mut rl, &thread, &path) {
                    Ok(texture) => {
                        let key = path.to_string_lossy().into_owned();
                        textures.insert(key.clone(), texture);
                        images.push(key);
                    }
                    Err(e) => warn!(error = %e, "skipping image"),
                }
            }
        }
        Err(e) => warn!(error = %e, "no slideshow images"),
    }

    if let Err(CarouselError::IndexOutOfRange { index, len }) = config.slideshow.validate(images.len()) {
        warn!(index, len, "initial slide out of range, opening on the first one");
        config.slideshow.initial_index = 0;
    }

    let now_ms = |rl: &RaylibHandle| (rl.get_time() * 1000.0) as u64;
    let mut page = build_page(
        images,
        &config,
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
        now_ms(&rl),
    );

    rl.hide_cursor();
    let mut hovered: HashSet<ElementId> = HashSet::new();
    let mut last_mouse = Vector2::new(-1.0, -1.0);
    let mut minimized = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = now_ms(&rl);

        // --- Input ---
        let mut events = Vec::new();

        if rl.is_window_resized() {
            events.push(PageEvent::Resize {
                width: rl.get_screen_width() as f32,
                height: rl.get_screen_height() as f32,
            });
        }

        if rl.is_window_minimized() != minimized {
            minimized = !minimized;
            events.push(PageEvent::VisibilityChanged { hidden: minimized });
        }

        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            let doc = page.document();
            let max_scroll = (doc.content_height() - doc.viewport().height).max(0.0);
            let y = (doc.scroll_y() - wheel * SCROLL_STEP).clamp(0.0, max_scroll);
            events.push(PageEvent::Scroll { y });
        }

        let mouse = rl.get_mouse_position();
        if mouse != last_mouse {
            events.push(PageEvent::PointerMove {
                x: mouse.x,
                y: mouse.y,
            });
            last_mouse = mouse;
        }
        let (px, py) = (mouse.x, mouse.y + page.document().scroll_y());
        let under_pointer: HashSet<ElementId> = page
            .document()
            .iter()
            .filter(|(id, e)| {
                !e.hidden && e.pointer_events && page.document().page_bounds(*id).contains_point(px, py)
            })
            .map(|(id, _)| id)
            .collect();
        events.extend(hovered.difference(&under_pointer).map(|id| PageEvent::PointerLeave(*id)));
        events.extend(under_pointer.difference(&hovered).map(|id| PageEvent::PointerEnter(*id)));
        hovered = under_pointer;

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(target) = page.document().hit_test(px, py) {
                events.push(PageEvent::Click(target));
            }
        }

        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            events.push(PageEvent::KeyDown(Key::ArrowLeft));
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            events.push(PageEvent::KeyDown(Key::ArrowRight));
        }

        for event in events {
            page.dispatch(event, now);
        }

        // --- Update Logic ---
        page.tick(now);

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        draw_page(&mut d, page.document(), &textures);
    }

    Ok(())
}
