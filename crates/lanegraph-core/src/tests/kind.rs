use crate::kind::normalize_label;
use crate::*;

#[test]
fn classify_uses_exact_names_then_prefixes() {
    assert_eq!(LayerKind::classify("Conv"), LayerKind::Conv);
    assert_eq!(LayerKind::classify("DWConv"), LayerKind::Conv);
    assert_eq!(LayerKind::classify("ConvTranspose"), LayerKind::Conv);
    assert_eq!(LayerKind::classify("concat"), LayerKind::Concat);
    assert_eq!(LayerKind::classify("Upsample"), LayerKind::Upsample);
    assert_eq!(LayerKind::classify("Segment"), LayerKind::Detect);
    assert_eq!(LayerKind::classify("C2fAttn"), LayerKind::C2f);
}

#[test]
fn classify_does_not_match_substrings() {
    // Only exact names and prefixes count; an embedded name is not enough.
    assert_eq!(LayerKind::classify("SPPF"), LayerKind::Unknown);
    assert_eq!(LayerKind::classify("MyConcatLike"), LayerKind::Unknown);
    assert_eq!(LayerKind::classify("C3"), LayerKind::Unknown);
    assert_eq!(LayerKind::classify(""), LayerKind::Unknown);
}

#[test]
fn merge_and_terminal_flags() {
    assert!(LayerKind::Concat.is_merge());
    assert!(!LayerKind::Conv.is_merge());
    assert!(LayerKind::Detect.is_terminal());
    assert!(!LayerKind::Upsample.is_terminal());
}

#[test]
fn normalize_label_strips_namespaces() {
    assert_eq!(normalize_label("nn.Upsample"), "Upsample");
    assert_eq!(normalize_label("torch.nn.modules.Conv2d"), "Conv2d");
    assert_eq!(normalize_label(" C2f "), "C2f");
    assert_eq!(normalize_label("trailing."), "trailing.");
}
