use super::*;

#[test]
fn default_paint_is_plain_src_over() {
    let p = Paint::default();
    assert!(!p.anti_alias);
    assert_eq!(p.compose, Compose::SrcOver);
    assert_eq!(p.color, Rgba8Premul::OPAQUE_BLACK);
}

#[test]
fn guard_restores_every_field() {
    let mut p = Paint {
        anti_alias: false,
        color: Rgba8Premul::from_straight_rgba(10, 20, 30, 40),
        compose: Compose::Src,
    };
    let before = p;
    {
        let mut g = p.scoped();
        g.anti_alias = true;
        g.color = Rgba8Premul::OPAQUE_BLACK;
        g.compose = SRC_IN;
        assert_eq!(g.compose, Compose::SrcIn);
        assert_eq!(*g.saved(), before);
    }
    assert_eq!(p, before);
}

#[test]
fn guard_restores_on_unwind() {
    let mut p = Paint::default();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut g = p.scoped();
        g.compose = Compose::Clear;
        panic!("draw failed");
    }));
    assert!(result.is_err());
    assert_eq!(p, Paint::default());
}

#[test]
fn compose_serde_names() {
    let s = serde_json::to_string(&Compose::SrcIn).unwrap();
    assert_eq!(s, "\"src_in\"");
    let c: Compose = serde_json::from_str("\"src_over\"").unwrap();
    assert_eq!(c, Compose::default());
}
