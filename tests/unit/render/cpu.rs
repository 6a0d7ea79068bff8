use super::*;
use crate::paint::Compose;

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

fn opaque(color: Rgba8Premul) -> Paint {
    Paint {
        anti_alias: true,
        color,
        compose: Compose::SrcOver,
    }
}

#[test]
fn rejects_degenerate_sizes() {
    assert!(matches!(
        CpuSurface::new(0, 10),
        Err(MaskError::Surface(_))
    ));
    assert!(CpuSurface::new(70_000, 1).is_err());
    assert!(CpuSurface::new(1, 1).is_ok());
}

#[test]
fn starts_transparent_or_with_background() {
    let s = CpuSurface::new(4, 3).unwrap();
    assert_eq!(s.data().len(), 4 * 3 * 4);
    assert!(s.data().iter().all(|&b| b == 0));

    let s = CpuSurface::with_background(2, 2, RED).unwrap();
    assert_eq!(s.pixel(1, 1), Some(RED));
    assert_eq!(s.pixel(2, 0), None);
}

#[test]
fn save_and_restore_track_counts() {
    let mut s = CpuSurface::new(8, 8).unwrap();
    assert_eq!(s.save_count(), 1);
    let a = s.save_layer(Rect::new(0.0, 0.0, 8.0, 8.0));
    let b = s.save_layer(Rect::new(2.0, 2.0, 6.0, 6.0));
    assert_eq!((a, b), (1, 2));
    assert_eq!(s.save_count(), 3);

    s.restore_to_count(5);
    assert_eq!(s.save_count(), 3);
    s.restore_to_count(b);
    assert_eq!(s.save_count(), 2);
    s.restore_to_count(0);
    assert_eq!(s.save_count(), 1);
}

#[test]
fn layer_content_merges_on_restore_only() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let count = s.save_layer(Rect::new(0.0, 0.0, 4.0, 4.0));
    s.fill_round_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, 0.0, &opaque(RED));
    assert_eq!(s.pixel(1, 1), Some(Rgba8Premul::transparent()));
    s.restore_to_count(count);
    assert_eq!(s.pixel(1, 1), Some(RED));
}

#[test]
fn layer_clips_draws_to_its_bounds() {
    let mut s = CpuSurface::new(6, 6).unwrap();
    let count = s.save_layer(Rect::new(2.0, 2.0, 4.0, 4.0));
    s.clear_argb(255, 255, 0, 0);
    s.restore_to_count(count);

    assert_eq!(s.pixel(2, 2), Some(RED));
    assert_eq!(s.pixel(3, 3), Some(RED));
    assert_eq!(s.pixel(1, 1), Some(Rgba8Premul::transparent()));
    assert_eq!(s.pixel(4, 4), Some(Rgba8Premul::transparent()));
}

#[test]
fn transparent_layer_leaves_content_below() {
    let mut s = CpuSurface::with_background(4, 4, RED).unwrap();
    let count = s.save_layer(Rect::new(0.0, 0.0, 4.0, 4.0));
    s.clear_argb(0, 0, 0, 0);
    s.restore_to_count(count);
    assert!(s.data().chunks_exact(4).all(|px| px == RED.to_array()));
}

#[test]
fn clear_replaces_rather_than_blends() {
    let mut s = CpuSurface::with_background(2, 2, RED).unwrap();
    s.clear_argb(0, 0, 0, 0);
    assert_eq!(s.pixel(0, 0), Some(Rgba8Premul::transparent()));
}

#[test]
fn draw_bitmap_scales_nearest() {
    let mut bmp = Bitmap::new(2, 2).unwrap();
    let blue = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    bmp.set_pixel(0, 0, RED);
    bmp.set_pixel(1, 1, blue);

    let mut s = CpuSurface::new(4, 4).unwrap();
    s.draw_bitmap(&bmp, Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::default());
    assert_eq!(s.pixel(0, 0), Some(RED));
    assert_eq!(s.pixel(1, 1), Some(RED));
    assert_eq!(s.pixel(2, 2), Some(blue));
    assert_eq!(s.pixel(3, 3), Some(blue));
    assert_eq!(s.pixel(3, 0), Some(Rgba8Premul::transparent()));
}

#[test]
fn draw_bitmap_respects_destination_offset() {
    let bmp = Bitmap::solid(2, 2, RED).unwrap();
    let mut s = CpuSurface::new(5, 5).unwrap();
    s.draw_bitmap(&bmp, Rect::new(2.0, 2.0, 4.0, 4.0), &Paint::default());
    assert_eq!(s.pixel(1, 1), Some(Rgba8Premul::transparent()));
    assert_eq!(s.pixel(2, 2), Some(RED));
    assert_eq!(s.pixel(3, 3), Some(RED));
    assert_eq!(s.pixel(4, 4), Some(Rgba8Premul::transparent()));
}

#[test]
fn draw_bitmap_is_modulated_by_paint_alpha() {
    let bmp = Bitmap::solid(1, 1, RED).unwrap();
    let mut s = CpuSurface::new(1, 1).unwrap();
    let paint = Paint {
        color: Rgba8Premul::from_straight_rgba(0, 0, 0, 128),
        ..Paint::default()
    };
    s.draw_bitmap(&bmp, Rect::new(0.0, 0.0, 1.0, 1.0), &paint);
    assert_eq!(s.pixel(0, 0).unwrap().to_array(), [128, 0, 0, 128]);
}

#[test]
fn src_in_bitmap_only_lands_on_existing_alpha() {
    let bmp = Bitmap::solid(4, 1, RED).unwrap();
    let mut s = CpuSurface::new(4, 1).unwrap();
    s.fill_round_rect(
        Rect::new(0.0, 0.0, 2.0, 1.0),
        0.0,
        0.0,
        &opaque(Rgba8Premul::OPAQUE_BLACK),
    );
    let paint = Paint {
        compose: Compose::SrcIn,
        ..Paint::default()
    };
    s.draw_bitmap(&bmp, Rect::new(0.0, 0.0, 4.0, 1.0), &paint);
    assert_eq!(s.pixel(0, 0), Some(RED));
    assert_eq!(s.pixel(1, 0), Some(RED));
    assert_eq!(s.pixel(2, 0), Some(Rgba8Premul::transparent()));
    assert_eq!(s.pixel(3, 0), Some(Rgba8Premul::transparent()));
}

#[test]
fn empty_destination_draws_nothing() {
    let bmp = Bitmap::solid(2, 2, RED).unwrap();
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.draw_bitmap(&bmp, Rect::new(2.0, 2.0, 0.0, 0.0), &Paint::default());
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn to_bitmap_matches_data() {
    let s = CpuSurface::with_background(3, 2, RED).unwrap();
    let bmp = s.to_bitmap().unwrap();
    assert_eq!(bmp.data(), s.data());
    assert_eq!((bmp.width(), bmp.height()), (3, 2));
}
