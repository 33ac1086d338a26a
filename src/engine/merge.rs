// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Merge policy for folding one graft's output into the shared facts.
//!
//! * Plain output is upserted key by key at the top level. Overlapping keys
//!   from different grafts resolve last-writer-wins in completion order.
//! * Namespaced output walks the namespace, creating an empty map for each
//!   missing segment, then upserts key by key into the map at the end.
//! * A namespace segment that already holds a non-map value is a structural
//!   collision. Nothing is merged and the existing value is left alone.

use serde_json::Value;

use crate::errors::GatherError;
use crate::grafts::GraftOutput;
use crate::targeting::Namespace;
use crate::Facts;

/// Fold `output` into `facts`. Returns the number of keys written.
pub(crate) fn merge_output(
    facts: &mut Facts,
    graft: &str,
    output: GraftOutput,
) -> Result<usize, GatherError> {
    match output {
        GraftOutput::Empty => Ok(0),
        GraftOutput::Plain(incoming) => Ok(upsert(facts, incoming)),
        GraftOutput::Namespaced(namespace, incoming) => {
            let target = descend(facts, &namespace).map_err(|segment| {
                GatherError::StructuralCollision {
                    graft: graft.to_string(),
                    namespace: namespace.to_string(),
                    segment,
                }
            })?;
            Ok(upsert(target, incoming))
        }
    }
}

fn upsert(facts: &mut Facts, incoming: Facts) -> usize {
    let count = incoming.len();
    for (key, value) in incoming {
        facts.insert(key, value);
    }
    count
}

/// Walk `namespace`, creating missing maps. On collision returns the offending segment.
///
/// Maps are only created past the last existing segment, so a collision is
/// always detected before anything is inserted.
fn descend<'a>(facts: &'a mut Facts, namespace: &Namespace) -> Result<&'a mut Facts, String> {
    let mut current = facts;
    for segment in namespace {
        let entry = current
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Facts::new()));
        match entry {
            Value::Object(map) => current = map,
            _ => return Err(segment.clone()),
        }
    }
    Ok(current)
}
