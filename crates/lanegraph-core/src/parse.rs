use crate::display::DisplayOptions;
use crate::kind::{LayerKind, normalize_label};
use crate::lane;
use crate::model::{LayerSpec, ModelDocument, Node, ParsedModel, Source, StrideMultiplier};
use crate::{Error, ParseOptions, Result};

const CHANNEL_DIVISOR: f64 = 8.0;

/// Rounds `v` up to the nearest multiple of the channel divisor.
pub fn make_divisible(v: f64) -> i64 {
    ((v / CHANNEL_DIVISOR).ceil() * CHANNEL_DIVISOR) as i64
}

/// Resolves one raw reference for the entry at `index`.
///
/// `-1` is the previous entry (or the synthetic input for the first entry); other negative
/// values are relative; non-negative values are absolute and must point backwards.
pub fn resolve_source(index: usize, raw: i64) -> Option<Source> {
    if raw == -1 {
        return Some(match index {
            0 => Source::Input,
            i => Source::Layer(i - 1),
        });
    }
    let abs = if raw < 0 { index as i64 + raw } else { raw };
    if abs < 0 || abs >= index as i64 {
        return None;
    }
    Some(Source::Layer(abs as usize))
}

fn scaled_repeats(raw: i64, depth_multiple: f64) -> i64 {
    if raw == 1 {
        return 1;
    }
    ((raw as f64 * depth_multiple).round_ties_even() as i64).max(1)
}

/// Walks the layer sequence once, left to right, simulating channel width and stride.
pub(crate) fn parse_document(
    doc: &ModelDocument,
    input_channels: i64,
    display: &DisplayOptions,
    options: ParseOptions,
) -> Result<ParsedModel> {
    let primary_len = doc.backbone.len();
    let last_index = doc.len().saturating_sub(1);

    // Output channels per entry index; `None` marks skipped entries.
    let mut channels: Vec<Option<i64>> = Vec::with_capacity(doc.len());
    let mut running = input_channels;
    let mut stride = StrideMultiplier::ONE;
    let mut nodes = Vec::with_capacity(doc.len());
    let mut skipped = Vec::new();

    for (index, entry) in doc.entries().enumerate() {
        let (spec, issues) = match LayerSpec::from_yaml(entry) {
            Ok(v) => v,
            Err(message) => {
                if options.strict {
                    return Err(Error::MalformedEntry { index, message });
                }
                tracing::warn!(index, %message, "skipping malformed layer entry");
                channels.push(None);
                skipped.push(index);
                continue;
            }
        };
        if let Some(message) = issues.first() {
            if options.strict {
                return Err(Error::MalformedEntry {
                    index,
                    message: message.clone(),
                });
            }
            for message in &issues {
                tracing::warn!(index, %message, "coerced layer entry field to a default");
            }
        }

        let kind_label = normalize_label(&spec.kind);
        let kind = LayerKind::classify(&kind_label);

        let mut sources: Vec<Source> = Vec::with_capacity(spec.source_refs.len());
        let mut dangling = Vec::new();
        let mut source_channels = Vec::with_capacity(spec.source_refs.len());
        for &raw in &spec.source_refs {
            let resolved = match resolve_source(index, raw) {
                Some(Source::Input) => Some((Source::Input, input_channels)),
                Some(Source::Layer(j)) => channels[j].map(|c| (Source::Layer(j), c)),
                None => None,
            };
            match resolved {
                Some((source, c)) => {
                    source_channels.push(c);
                    if !sources.contains(&source) {
                        sources.push(source);
                    }
                }
                None => {
                    if options.strict {
                        return Err(Error::UnresolvableSource {
                            index,
                            source_ref: raw,
                        });
                    }
                    tracing::warn!(
                        index,
                        source_ref = raw,
                        fallback_channels = running,
                        "dropping unresolvable source reference"
                    );
                    source_channels.push(running);
                    dangling.push(raw);
                }
            }
        }

        let first_channels = source_channels.first().copied().unwrap_or(running);
        let node_input_channels = if source_channels.is_empty() {
            running
        } else {
            source_channels
                .iter()
                .fold(0i64, |acc, &c| acc.saturating_add(c))
        };

        let output_channels = if kind.is_merge() {
            node_input_channels
        } else {
            let base = spec
                .raw_args
                .first()
                .and_then(|a| a.as_i64())
                .unwrap_or(first_channels);
            if kind.is_terminal() {
                base
            } else {
                make_divisible(base as f64 * doc.width_multiple)
            }
        };

        let next_stride = match kind {
            LayerKind::Conv if spec.raw_args.iter().any(|a| a.is_two()) => stride.doubled(),
            LayerKind::Upsample => stride.halved(),
            _ => stride,
        };

        let repeats = scaled_repeats(spec.repeat_count, doc.depth_multiple);
        let lane = lane::classify(index, primary_len, last_index, kind);
        let display_text = display.display_text(
            &kind_label,
            next_stride,
            output_channels,
            repeats,
            &spec.raw_args,
        );

        tracing::debug!(
            index,
            ?lane,
            ?kind,
            output_channels,
            stride = %next_stride,
            "parsed layer"
        );

        nodes.push(Node {
            index,
            lane,
            kind,
            kind_label,
            sources,
            dangling_sources: dangling,
            input_channels: node_input_channels,
            output_channels,
            stride: next_stride,
            repeats,
            args: spec.raw_args,
            display_text,
        });
        channels.push(Some(output_channels));
        running = output_channels;
        stride = next_stride;
    }

    Ok(ParsedModel {
        nodes,
        primary_len,
        input_channels,
        depth_multiple: doc.depth_multiple,
        width_multiple: doc.width_multiple,
        skipped,
    })
}
