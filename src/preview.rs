use std::path::Path;

use eframe::egui;

/// Decode an image file into an `egui::ColorImage`, downscaled so its longest
/// edge is at most `max_px`. Returns `None` for anything `image` can't read,
/// so non-image uploads simply get no thumbnail.
pub fn color_image_from_path(path: &Path, max_px: u32) -> Option<egui::ColorImage> {
    let img = image::open(path).ok()?;
    let img = if img.width() > max_px || img.height() > max_px {
        img.thumbnail(max_px, max_px)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(egui::ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        rgba.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_images_are_downscaled() {
        let td = tempfile::tempdir().expect("tempdir");
        let path = td.path().join("big.png");
        image::RgbaImage::from_pixel(400, 200, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let preview = color_image_from_path(&path, 100).expect("decoded");
        assert_eq!(preview.size, [100, 50]);
    }

    #[test]
    fn non_images_have_no_preview() {
        let td = tempfile::tempdir().expect("tempdir");
        let path = td.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(color_image_from_path(&path, 100).is_none());
    }
}
