use std::path::PathBuf;

use image::RgbaImage;
use log::{info, warn};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::controller::InteractionController;
use crate::provider::MapProvider;

/// Colour shown behind transparent pixels (dark space).
const BACKGROUND: [u8; 3] = [5, 5, 15];

/// Window size used while no map is loaded.
const EMPTY_SIZE: (usize, usize) = (520, 320);

/// Largest window; bigger maps scroll inside it.
const MAX_WINDOW: (usize, usize) = (1200, 900);

/// Pixels moved per arrow key press.
const SCROLL_STEP: usize = 64;

/// Run the interactive viewer until the window is closed or Escape is pressed.
///
/// 1/2 switch between political and physical mode, +/- zoom, arrows scroll, R reloads,
/// S saves the base image as PNG, J exports the map as JSON, left click inspects a tile.
pub fn run_viewer<P: MapProvider>(
    controller: &mut InteractionController<P>,
    title: &str,
) -> Result<(), minifb::Error> {
    let mut size = window_size(controller.display_size());
    let mut window = open_window(title, size)?;
    let mut scroll = (0, 0);

    println!("Viewer started. Controls:");
    println!("  1: Political mode");
    println!("  2: Physical mode");
    println!("  +/-: Zoom in/out");
    println!("  Arrows: Scroll");
    println!("  Click: Inspect tile");
    println!("  R: Reload  S: Save PNG  J: Export JSON");
    println!("  Esc: Exit");

    let mut buffer = frame(controller, size, scroll);
    let mut was_down = false;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;

        let new_mode = if window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            Some("political")
        } else if window.is_key_pressed(Key::Key2, KeyRepeat::No) {
            Some("physical")
        } else {
            None
        };
        if let Some(mode) = new_mode {
            if mode != controller.mode().name() {
                // Failures are already in the status line
                let _ = controller.set_mode(mode);
                needs_redraw = true;
            }
        }

        if window.is_key_pressed(Key::Equal, KeyRepeat::No)
            || window.is_key_pressed(Key::NumPadPlus, KeyRepeat::No)
        {
            let zoom = controller.zoom_in();
            info!("Zoom: {}", zoom);
            needs_redraw = true;
        }
        if window.is_key_pressed(Key::Minus, KeyRepeat::No)
            || window.is_key_pressed(Key::NumPadMinus, KeyRepeat::No)
        {
            let zoom = controller.zoom_out();
            info!("Zoom: {}", zoom);
            needs_redraw = true;
        }

        let mut step = (0i64, 0i64);
        if window.is_key_pressed(Key::Left, KeyRepeat::Yes) {
            step.0 -= SCROLL_STEP as i64;
        }
        if window.is_key_pressed(Key::Right, KeyRepeat::Yes) {
            step.0 += SCROLL_STEP as i64;
        }
        if window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            step.1 -= SCROLL_STEP as i64;
        }
        if window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            step.1 += SCROLL_STEP as i64;
        }
        if step != (0, 0) {
            scroll = (
                (scroll.0 as i64 + step.0).max(0) as usize,
                (scroll.1 as i64 + step.1).max(0) as usize,
            );
            needs_redraw = true;
        }

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            let _ = controller.reload();
            needs_redraw = true;
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            if let Some(path) = sibling_path(controller, "png") {
                if let Err(e) = controller.save_png(&path) {
                    warn!("Could not save image: {}", e);
                }
            }
        }
        if window.is_key_pressed(Key::J, KeyRepeat::No) {
            if let Some(path) = sibling_path(controller, "export.json") {
                if let Err(e) = controller.export_json(&path) {
                    warn!("Could not export map: {}", e);
                }
            }
        }

        let mouse_down = window.get_mouse_down(MouseButton::Left);
        if mouse_down && !was_down {
            if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Discard) {
                let x = mx as i64 + scroll.0 as i64;
                let y = my as i64 + scroll.1 as i64;
                if let Some(text) = controller.handle_click(x, y) {
                    println!("{}", text);
                }
            }
        }
        was_down = mouse_down;

        if needs_redraw {
            let new_size = window_size(controller.display_size());
            if new_size != size {
                size = new_size;
                window = open_window(title, size)?;
            }
            scroll = clamp_scroll(scroll, controller.display_size(), size);
            buffer = frame(controller, size, scroll);
            window.set_title(&format!("{} - {} | {}", title, controller.zoom(), controller.status()));
        }

        window.update_with_buffer(&buffer, size.0, size.1)?;
    }

    Ok(())
}

/// Window size for a display of the given size, capped at `MAX_WINDOW`.
fn window_size(display: (u32, u32)) -> (usize, usize) {
    match display {
        (w, h) if w > 0 && h > 0 => (
            (w as usize).min(MAX_WINDOW.0),
            (h as usize).min(MAX_WINDOW.1),
        ),
        _ => EMPTY_SIZE,
    }
}

/// Keep the scroll offset so the window never runs past the display.
fn clamp_scroll(scroll: (usize, usize), display: (u32, u32), window: (usize, usize)) -> (usize, usize) {
    (
        scroll.0.min((display.0 as usize).saturating_sub(window.0)),
        scroll.1.min((display.1 as usize).saturating_sub(window.1)),
    )
}

fn frame<P: MapProvider>(
    controller: &InteractionController<P>,
    size: (usize, usize),
    scroll: (usize, usize),
) -> Vec<u32> {
    let (w, h) = controller.display_size();
    let view = controller.render_viewport(w.max(size.0 as u32), h.max(size.1 as u32));
    to_window_buffer(&view, size, scroll)
}

fn open_window(title: &str, size: (usize, usize)) -> Result<Window, minifb::Error> {
    let mut window = Window::new(
        title,
        size.0,
        size.1,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;

    // Limit to ~60fps
    window.set_target_fps(60);
    Ok(window)
}

/// Path next to the loaded map with a new extension.
fn sibling_path<P: MapProvider>(controller: &InteractionController<P>, extension: &str) -> Option<PathBuf> {
    controller.source().map(|p| p.with_extension(extension))
}

/// Convert the part of an RGBA image starting at `offset` into minifb's 0RGB
/// buffer of exactly `size`, blending transparent pixels onto the background.
pub fn to_window_buffer(img: &RgbaImage, size: (usize, usize), offset: (usize, usize)) -> Vec<u32> {
    let (width, height) = size;
    let bg = ((BACKGROUND[0] as u32) << 16) | ((BACKGROUND[1] as u32) << 8) | BACKGROUND[2] as u32;
    let mut buffer = vec![bg; width * height];

    let visible_w = (img.width() as usize).saturating_sub(offset.0).min(width);
    let visible_h = (img.height() as usize).saturating_sub(offset.1).min(height);

    for y in 0..visible_h {
        for x in 0..visible_w {
            let pixel = img.get_pixel((x + offset.0) as u32, (y + offset.1) as u32);
            let alpha = pixel[3] as u32;
            let blend = |c: u8, b: u8| (c as u32 * alpha + b as u32 * (255 - alpha)) / 255;
            let r = blend(pixel[0], BACKGROUND[0]);
            let g = blend(pixel[1], BACKGROUND[1]);
            let b = blend(pixel[2], BACKGROUND[2]);
            buffer[y * width + x] = (r << 16) | (g << 8) | b;
        }
    }

    buffer
}
