//! pipeline/plan.rs
//! Fixed per-codec action sequences.
//!
//! Coverage is deliberately asymmetric: gzip only checks the subject encoder
//! against a reference decoder, zstd only checks the subject decoder against a
//! reference encoder. The three-way codecs end by handing the subject's own
//! artifact (written two steps earlier) to the reference decoder.
use crate::compression::{CodecId, CodecSpec};
use crate::pipeline::types::{Action, Actor};

pub fn plan(codec: CodecId, level_override: Option<i32>) -> Vec<Action> {
    let spec = CodecSpec::for_id(codec);
    let level = Some(level_override.unwrap_or(spec.default_level));

    match codec {
        CodecId::Gzip => vec![
            Action::compress(Actor::Subject, None),
            Action::decompress(Actor::Reference),
        ],
        CodecId::Zstd => vec![
            Action::compress(Actor::Reference, level),
            Action::decompress(Actor::Subject),
        ],
        CodecId::Lzma | CodecId::Lz4 | CodecId::Lpaq8 => vec![
            Action::compress(Actor::Reference, level),
            Action::decompress(Actor::Subject),
            Action::compress(Actor::Subject, None),
            Action::decompress(Actor::Subject),
            Action::decompress(Actor::Reference),
        ],
        CodecId::ZipDeflate | CodecId::ZipLzma => vec![
            Action::compress(Actor::Subject, None),
            Action::validate_container(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::ActionKind;

    #[test]
    fn gzip_is_subject_encode_reference_decode() {
        assert_eq!(
            plan(CodecId::Gzip, None),
            vec![Action::compress(Actor::Subject, None), Action::decompress(Actor::Reference)]
        );
    }

    #[test]
    fn zstd_is_reference_encode_subject_decode_at_level_9() {
        assert_eq!(
            plan(CodecId::Zstd, None),
            vec![Action::compress(Actor::Reference, Some(9)), Action::decompress(Actor::Subject)]
        );
    }

    #[test]
    fn three_way_codecs_use_their_default_levels() {
        for (codec, level) in [(CodecId::Lzma, 4), (CodecId::Lz4, 5), (CodecId::Lpaq8, 3)] {
            let actions = plan(codec, None);
            assert_eq!(actions.len(), 5, "{}", codec);
            assert_eq!(actions[0], Action::compress(Actor::Reference, Some(level)));
            assert_eq!(actions[1], Action::decompress(Actor::Subject));
            assert_eq!(actions[2], Action::compress(Actor::Subject, None));
            assert_eq!(actions[3], Action::decompress(Actor::Subject));
            assert_eq!(actions[4], Action::decompress(Actor::Reference));
        }
    }

    #[test]
    fn containers_are_only_validated() {
        for codec in [CodecId::ZipDeflate, CodecId::ZipLzma] {
            let actions = plan(codec, None);
            assert_eq!(actions.len(), 2);
            assert_eq!(actions[0].actor, Actor::Subject);
            assert_eq!(actions[1].kind, ActionKind::ValidateContainer);
            assert!(actions.iter().all(|a| a.kind != ActionKind::Decompress));
        }
    }

    #[test]
    fn level_override_applies_to_reference_compress_only() {
        let actions = plan(CodecId::Lzma, Some(7));
        assert_eq!(actions[0].level, Some(7));
        assert_eq!(actions[2].level, None);
        assert_eq!(plan(CodecId::Gzip, Some(1))[0].level, None);
    }

    #[test]
    fn every_plan_with_decompress_exercises_both_directions_overall() {
        let mut subject_encodes_reference_decodes = false;
        let mut reference_encodes_subject_decodes = false;
        for codec in CodecId::ALL {
            let actions = plan(codec, None);
            for pair in actions.windows(2) {
                if pair[0].kind == ActionKind::Compress && pair[1].kind == ActionKind::Decompress {
                    match (pair[0].actor, pair[1].actor) {
                        (Actor::Subject, Actor::Reference) => subject_encodes_reference_decodes = true,
                        (Actor::Reference, Actor::Subject) => reference_encodes_subject_decodes = true,
                        _ => {}
                    }
                }
            }
        }
        assert!(subject_encodes_reference_decodes);
        assert!(reference_encodes_subject_decodes);
    }
}
