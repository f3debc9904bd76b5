use lanegraph_core::{Engine, ParseOptions, ParsedModel};

mod config;
mod route;
mod svg;

fn parse(text: &str) -> ParsedModel {
    Engine::new()
        .parse_model_sync(text, ParseOptions::default())
        .unwrap()
}

/// `primary` convs followed by `intermediate` convs; no terminal node.
fn conv_stack(primary: usize, intermediate: usize) -> ParsedModel {
    let mut text = String::from("backbone:\n");
    for _ in 0..primary {
        text.push_str("  - [-1, 1, Conv, [32, 3, 1]]\n");
    }
    text.push_str("head:\n");
    for _ in 0..intermediate {
        text.push_str("  - [-1, 1, Conv, [32, 3, 1]]\n");
    }
    if intermediate == 0 {
        text.push_str("  []\n");
    }
    parse(&text)
}

/// Five primary convs, an upsample/concat chain in the intermediate lane and a detection head.
const ROUTING_MODEL: &str = r#"
backbone:
  - [-1, 1, Conv, [16, 3, 2]]
  - [-1, 1, Conv, [32, 3, 2]]
  - [-1, 1, Conv, [64, 3, 2]]
  - [-1, 1, Conv, [128, 3, 2]]
  - [-1, 1, Conv, [256, 3, 2]]
head:
  - [-1, 1, nn.Upsample, [None, 2, nearest]]
  - [[-1, 3], 1, Concat, [1]]
  - [[-1, 5], 1, Concat, [1]]
  - [[2, 7], 1, Detect, [80]]
"#;
