//! Template scoring.
//!
//! # Responsibilities
//! - Gate on segment count
//! - Score path segments (literal = 2, parameter = 1)
//! - Require every template query parameter on the candidate
//!
//! # Design Decisions
//! - Any literal mismatch aborts with rank 0
//! - Candidate query keys absent from the template are ignored
//! - Literals weigh double so more specific templates win

use crate::routing::route::{Route, Segment};
use crate::routing::types::Rank;

const LITERAL_WEIGHT: Rank = 2;
const PARAM_WEIGHT: Rank = 1;

/// Score `candidate` against `template`. Zero means no match.
pub fn score(template: &Route, candidate: &Route) -> Rank {
    if template.segment_count() != candidate.segment_count() {
        return 0;
    }

    let mut rank = 0;
    for (position, segment) in template.segments() {
        match segment {
            Segment::Param => rank += PARAM_WEIGHT,
            Segment::Literal(expected) => match candidate.segments().get(position) {
                Some(Segment::Literal(actual)) if actual == expected => rank += LITERAL_WEIGHT,
                _ => return 0,
            },
        }
    }

    let queries_match = template
        .query_params()
        .iter()
        .all(|(key, value)| candidate.query_params().get(key) == Some(value));
    if !queries_match {
        return 0;
    }

    rank
}
