//! End-to-end rendering scenarios.


use std::f64::consts::FRAC_PI_4;

use tiny_skia::Pixmap;
use toppi_core::rendering::text::{ITEM_SLOT_HEIGHT, MARGIN, SPACING, TITLE_SLOT_HEIGHT};
use toppi_core::{
    AssetLibrary, BackgroundImage, DesignSettings, ExportFormat, ListContent, ListTemplate, Point,
    RasterImage, RenderError, StickerItem,
};
use test_utils::*;

fn my_list() -> ListContent {
    ListContent::new("My List", ["A", "B", "C"])
}

#[test]
fn test_default_instagram_post() {
    let image = pipeline()
        .render(&my_list(), &DesignSettings::default(), ExportFormat::InstagramPost)
        .unwrap();

    assert_eq!((image.width(), image.height()), (2160, 2160));
    // No border: the canvas edge is background
    assert_eq!(image.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(2159, 1080), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(1080, 2159), Some([255, 255, 255, 255]));
}

#[test]
fn test_every_format_has_oversampled_size() {
    let pipeline = pipeline();
    for format in ExportFormat::ALL {
        let image = pipeline
            .render(&my_list(), &DesignSettings::default(), format)
            .unwrap();
        assert_eq!((image.width(), image.height()), format.canvas_size());
    }
}

#[test]
fn test_twitter_gradient() {
    let mut settings = DesignSettings::default();
    settings.use_gradient = true;
    settings.gradient_colors = vec!["#FF0000".to_string(), "#0000FF".to_string()];

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::Twitter)
        .unwrap();

    assert_eq!((image.width(), image.height()), (2400, 1350));
    assert_rgb_near(&image, 0, 0, [255, 0, 0], 3);
    assert_rgb_near(&image, 2399, 1349, [0, 0, 255], 3);
    assert_rgb_near(&image, 1200, 675, [128, 0, 128], 3);
}

#[test]
fn test_single_gradient_color_is_ignored() {
    let mut settings = DesignSettings::default();
    settings.background_color = "#00FF00".to_string();
    settings.use_gradient = true;
    settings.gradient_colors = vec!["#FF0000".to_string()];

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::InstagramPost)
        .unwrap();
    assert_eq!(image.pixel(10, 10), Some([0, 255, 0, 255]));
}

#[test]
fn test_border_with_oversized_radius() {
    let mut settings = DesignSettings::default();
    settings.border_width = 8.0;
    settings.corner_radius = 1000.0;
    settings.border_color = "#000000".to_string();

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::InstagramPost)
        .unwrap();

    // Left edge midpoint sits on the straight part of the stroke
    assert_eq!(image.pixel(8, 1080), Some([0, 0, 0, 255]));
    // With radius 536 the corners are far from the stroke
    assert_eq!(image.pixel(4, 4), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(2155, 2155), Some([255, 255, 255, 255]));
}

#[test]
fn test_item_counts() {
    let pipeline = pipeline_with_system_fonts();
    for count in 0..=5 {
        let items: Vec<String> = (0..count).map(|i| format!("Item {}", i)).collect();
        let content = ListContent::new("Counting", items);
        let image = pipeline
            .render(&content, &DesignSettings::default(), ExportFormat::InstagramStory)
            .unwrap();
        assert_eq!((image.width(), image.height()), (2160, 3840));
    }
}

#[test]
fn test_five_items_fit_a_square_canvas() {
    let bottom = MARGIN + TITLE_SLOT_HEIGHT + SPACING + 5.0 * (ITEM_SLOT_HEIGHT + SPACING);
    assert!(bottom <= 1080.0);
}

#[test]
fn test_rotated_sticker_stays_centered() {
    let mut sticker = Pixmap::new(10, 10).unwrap();
    sticker.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
    let mut assets = AssetLibrary::new();
    assets.insert("star", sticker);

    let mut settings = DesignSettings::default();
    settings.stickers.push(
        StickerItem::new("star", Point::new(540.0, 540.0)).with_rotation(FRAC_PI_4),
    );

    let image = pipeline_with_assets(assets)
        .render(&ListContent::default(), &settings, ExportFormat::InstagramPost)
        .unwrap();

    assert_rgb_near(&image, 1080, 1080, [255, 0, 0], 2);
    // Corner of the unrotated box falls outside the rotated one
    assert_eq!(image.pixel(984, 984), Some([255, 255, 255, 255]));
    // Tip of the rotated box reaches beyond the unrotated half-width
    assert_rgb_near(&image, 1080, 1080 - 130, [255, 0, 0], 2);
}

#[test]
fn test_missing_sticker_is_skipped() {
    let mut settings = DesignSettings::default();
    settings
        .stickers
        .push(StickerItem::new("does-not-exist", Point::new(540.0, 540.0)));

    let image = pipeline()
        .render(&ListContent::default(), &settings, ExportFormat::InstagramPost)
        .unwrap();
    assert_eq!(image.pixel(1080, 1080), Some([255, 255, 255, 255]));
}

#[test]
fn test_uploaded_photo_covers_canvas() {
    let mut settings = DesignSettings::default();
    settings.background_image = Some(BackgroundImage::Uploaded(png_bytes(4, 2, [0, 0, 255, 255])));

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::InstagramStory)
        .unwrap();
    assert_rgb_near(&image, 0, 0, [0, 0, 255], 2);
    assert_rgb_near(&image, 2159, 3839, [0, 0, 255], 2);
}

#[test]
fn test_broken_upload_falls_back_to_background_color() {
    let mut settings = DesignSettings::default();
    settings.background_color = "#00FF00".to_string();
    settings.background_image = Some(BackgroundImage::Uploaded(b"not an image".to_vec()));

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::InstagramPost)
        .unwrap();
    assert_eq!(image.pixel(0, 0), Some([0, 255, 0, 255]));
}

#[test]
fn test_stock_background() {
    let mut settings = DesignSettings::default();
    settings.background_image = Some(BackgroundImage::Named("solid-black".to_string()));

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::Twitter)
        .unwrap();
    assert_rgb_near(&image, 5, 5, [0, 0, 0], 2);
}

#[test]
fn test_bundled_asset_shadows_stock_name() {
    let mut assets = AssetLibrary::new();
    assets
        .insert_encoded("solid-black", &png_bytes(2, 2, [255, 255, 0, 255]))
        .unwrap();

    let mut settings = DesignSettings::default();
    settings.background_image = Some(BackgroundImage::Named("solid-black".to_string()));

    let image = pipeline_with_assets(assets)
        .render(&my_list(), &settings, ExportFormat::InstagramPost)
        .unwrap();
    assert_rgb_near(&image, 5, 5, [255, 255, 0], 2);
}

#[test]
fn test_gradient_overlays_named_background() {
    let mut settings = DesignSettings::default();
    settings.background_image = Some(BackgroundImage::Named("solid-black".to_string()));
    settings.use_gradient = true;
    settings.gradient_colors = vec!["#FF0000".to_string(), "#FF0000".to_string()];

    let image = pipeline()
        .render(&my_list(), &settings, ExportFormat::InstagramPost)
        .unwrap();
    assert_eq!(image.pixel(1000, 1000), Some([255, 0, 0, 255]));
}

#[test]
fn test_template_renders() {
    let pipeline = pipeline_with_system_fonts();
    for template in ListTemplate::ALL {
        let settings = DesignSettings::from_template(template);
        let image = pipeline
            .render(&my_list(), &settings, ExportFormat::InstagramPost)
            .unwrap();
        assert_eq!(image.width(), 2160, "{} failed", template.name());
    }
}

#[test]
fn test_invalid_canvas_is_an_error() {
    let result = pipeline().render_with_size(&my_list(), &DesignSettings::default(), (0.0, 0.0));
    assert!(matches!(result, Err(RenderError::InvalidDimensions { .. })));
}

/// Pixel bounding box `(min_x, min_y, max_x, max_y)` of strongly red pixels.
fn red_bounds(image: &RasterImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let [r, g, b, _] = image.pixel(x, y).unwrap();
            if r > 200 && g < 80 && b < 80 {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

#[test]
fn test_text_is_drawn_inside_margins() {
    let pipeline = pipeline_with_system_fonts();
    if pipeline.fonts().is_empty() {
        eprintln!("no system fonts; skipping");
        return;
    }
    let settings = DesignSettings {
        text_color: "#FF0000".to_string(),
        ..DesignSettings::default()
    };
    let margin_px = (MARGIN * 2.0) as u32;
    let right_px = 2160 - margin_px;

    let title_only = ListContent::new("My List", Vec::<String>::new());
    let image = pipeline
        .render(&title_only, &settings, ExportFormat::InstagramPost)
        .unwrap();
    let (min_x, min_y, max_x, _) = red_bounds(&image).expect("title was not drawn");
    assert!(min_x >= margin_px, "title starts at x={}", min_x);
    assert!(min_y >= margin_px, "title starts at y={}", min_y);
    assert!(max_x <= right_px, "title ends at x={}", max_x);

    let long = "a very long ranked item that has to wrap over several lines of text ".repeat(3);
    let content = ListContent::new("My List", [long.as_str(), "B"]);
    let image = pipeline
        .render(&content, &settings, ExportFormat::InstagramPost)
        .unwrap();
    let (min_x, min_y, max_x, max_y) = red_bounds(&image).expect("items were not drawn");
    assert!(min_x >= margin_px, "text starts at x={}", min_x);
    assert!(min_y >= margin_px, "text starts at y={}", min_y);
    assert!(max_x <= right_px, "wrapped item ends at x={}", max_x);
    // Wrapping produced more than one item line below the title slot
    let title_bottom_px = ((MARGIN + TITLE_SLOT_HEIGHT + SPACING + ITEM_SLOT_HEIGHT) * 2.0) as u32;
    assert!(max_y > title_bottom_px, "text ends at y={}", max_y);
}
