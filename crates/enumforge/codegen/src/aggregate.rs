//! Fragment aggregation and collision validation.
//!
//! # Role
//!
//! Accumulates declared fragments across discovery passes into per-type
//! collections, maintaining used-identifier and used-name indices for O(1)
//! collision detection. Admission is atomic per fragment: a rejected
//! fragment leaves no trace in either index.
//!
//! The aggregator is not thread-safe by contract: the host drives it from
//! a single thread, feeding passes serially. Wrap it in a mutex if a
//! multi-threaded discovery phase is ever introduced.

use std::collections::BTreeMap;

use enumforge_core::fragment::{Fragment, Origin};
use enumforge_core::ident::{IdentError, check_ident};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Errors produced while admitting fragments.
#[derive(Debug, Clone, Error)]
pub enum ConflictError {
	/// Name or logical-type name fails the generated-language grammar.
	#[error("invalid {field} '{value}' at {origin}: {source}")]
	InvalidIdentifier {
		field: &'static str,
		value: String,
		origin: Origin,
		source: IdentError,
	},

	/// Identifier already admitted within this logical type.
	#[error("duplicate id {id} in enum type '{logical_type}' (for name '{name}', at {origin})")]
	DuplicateId {
		logical_type: String,
		id: i32,
		name: String,
		origin: Origin,
	},

	/// Name already admitted within this logical type.
	#[error(
		"duplicate name '{name}' in enum type '{logical_type}' (id {id}, at {origin}; \
		 conflicts with declaration at {conflicting_origin})"
	)]
	DuplicateName {
		logical_type: String,
		name: String,
		id: i32,
		origin: Origin,
		conflicting_origin: Origin,
	},

	/// The run already finalized its definitions; fragments are no longer
	/// accepted.
	#[error("definitions already finalized for this run")]
	AlreadyFinalized,
}

/// Non-blocking diagnostics emitted during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
	/// Identifier zero used by a name that does not read as a deliberate
	/// zero sentinel.
	ZeroId { logical_type: String, name: String },
}

impl std::fmt::Display for Advisory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ZeroId { logical_type, name } => write!(
				f,
				"enum type '{logical_type}': value '{name}' uses identifier 0 \
				 without an unspecified-style sentinel name"
			),
		}
	}
}

/// Outcome of feeding one batch of fragments.
#[derive(Debug, Default)]
pub struct PassReport {
	/// Fragments admitted into the definition sets.
	pub admitted: usize,
	/// Per-fragment rejections; the rest of the batch is unaffected.
	pub errors: Vec<ConflictError>,
	/// True when the run had already generated and the pass was ignored.
	pub skipped: bool,
}

#[derive(Default)]
struct TypeGroup {
	used_ids: FxHashSet<i32>,
	used_names: FxHashMap<String, Origin>,
	/// Kept sorted by identifier at all times.
	fragments: Vec<Fragment>,
}

/// Validated, conflict-free fragment sequences keyed by logical-type name.
///
/// Iteration is sorted by logical-type name so generation output is
/// reproducible across runs regardless of discovery order; each sequence
/// is sorted by identifier. This is the only input the artifact generator
/// accepts, so raw unvalidated fragments can never reach it.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSets(BTreeMap<String, Vec<Fragment>>);

impl DefinitionSets {
	/// Iterates `(logical_type, fragments)` pairs in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[Fragment])> {
		self.0.iter().map(|(name, frags)| (name.as_str(), frags.as_slice()))
	}

	/// Fragments of one logical type, in identifier order.
	pub fn get(&self, logical_type: &str) -> Option<&[Fragment]> {
		self.0.get(logical_type).map(Vec::as_slice)
	}

	/// Number of logical types.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when no logical type holds any fragment.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Accumulates fragments across discovery passes and validates collisions.
pub struct Aggregator {
	groups: FxHashMap<String, TypeGroup>,
	advisories: Vec<Advisory>,
	finalized: bool,
}

impl Aggregator {
	/// Creates an empty aggregator in its collecting state.
	pub fn new() -> Self {
		Self {
			groups: FxHashMap::default(),
			advisories: Vec::new(),
			finalized: false,
		}
	}

	/// Admits one discovered fragment.
	///
	/// Validation order follows the admission algorithm: identifier
	/// grammar first, then the id index, then the name index. The two
	/// index checks behave as one atomic admission; when the name check
	/// fails, the id reservation made just before it is rolled back.
	pub fn record(&mut self, fragment: Fragment) -> Result<(), ConflictError> {
		if self.finalized {
			return Err(ConflictError::AlreadyFinalized);
		}

		check_ident(fragment.logical_type()).map_err(|source| {
			ConflictError::InvalidIdentifier {
				field: "type",
				value: fragment.logical_type().to_owned(),
				origin: fragment.origin().clone(),
				source,
			}
		})?;
		check_ident(fragment.name()).map_err(|source| ConflictError::InvalidIdentifier {
			field: "name",
			value: fragment.name().to_owned(),
			origin: fragment.origin().clone(),
			source,
		})?;

		let group = self
			.groups
			.entry(fragment.logical_type().to_owned())
			.or_default();

		if !group.used_ids.insert(fragment.id()) {
			return Err(ConflictError::DuplicateId {
				logical_type: fragment.logical_type().to_owned(),
				id: fragment.id(),
				name: fragment.name().to_owned(),
				origin: fragment.origin().clone(),
			});
		}

		if let Some(conflicting) = group.used_names.get(fragment.name()) {
			let conflicting_origin = conflicting.clone();
			// Roll back the id reservation; admission is all-or-nothing.
			group.used_ids.remove(&fragment.id());
			return Err(ConflictError::DuplicateName {
				logical_type: fragment.logical_type().to_owned(),
				name: fragment.name().to_owned(),
				id: fragment.id(),
				origin: fragment.origin().clone(),
				conflicting_origin,
			});
		}
		group
			.used_names
			.insert(fragment.name().to_owned(), fragment.origin().clone());

		if fragment.id() == 0 && !is_zero_sentinel(fragment.name()) {
			tracing::warn!(
				logical_type = fragment.logical_type(),
				name = fragment.name(),
				"identifier 0 used without an unspecified-style sentinel name"
			);
			self.advisories.push(Advisory::ZeroId {
				logical_type: fragment.logical_type().to_owned(),
				name: fragment.name().to_owned(),
			});
		}

		let pos = group
			.fragments
			.partition_point(|f| f.cmp_by_id(&fragment).is_lt());
		group.fragments.insert(pos, fragment);
		Ok(())
	}

	/// Feeds a batch of fragments, recovering per fragment: one bad
	/// fragment is rejected (and logged) without affecting the rest.
	pub fn record_all<I: IntoIterator<Item = Fragment>>(&mut self, fragments: I) -> PassReport {
		let mut report = PassReport::default();
		for fragment in fragments {
			match self.record(fragment) {
				Ok(()) => report.admitted += 1,
				Err(err) => {
					tracing::warn!(error = %err, "fragment rejected");
					report.errors.push(err);
				}
			}
		}
		report
	}

	/// Advisories gathered so far (never blocking).
	pub fn advisories(&self) -> &[Advisory] {
		&self.advisories
	}

	/// Number of fragments admitted so far.
	pub fn len(&self) -> usize {
		self.groups.values().map(|g| g.fragments.len()).sum()
	}

	/// True when nothing has been admitted.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// True once [`Aggregator::finish`] has run.
	pub fn is_finalized(&self) -> bool {
		self.finalized
	}

	/// Finalizes aggregation and yields the validated definition sets.
	///
	/// Transitions the run from collecting to generated; afterwards both
	/// `record` and `finish` report [`ConflictError::AlreadyFinalized`].
	pub fn finish(&mut self) -> Result<DefinitionSets, ConflictError> {
		if self.finalized {
			return Err(ConflictError::AlreadyFinalized);
		}
		self.finalized = true;

		let mut sets = BTreeMap::new();
		for (logical_type, group) in self.groups.drain() {
			if group.fragments.is_empty() {
				continue;
			}
			sets.insert(logical_type, group.fragments);
		}
		Ok(DefinitionSets(sets))
	}
}

impl Default for Aggregator {
	fn default() -> Self {
		Self::new()
	}
}

/// Names that mark identifier 0 as a deliberate "unspecified" sentinel.
fn is_zero_sentinel(name: &str) -> bool {
	let lower = name.to_ascii_lowercase();
	lower == "none" || lower == "zero" || lower.ends_with("unspecified") || lower.ends_with("unknown")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frag(logical_type: &str, id: i32, name: &str) -> Fragment {
		Fragment::new(logical_type, id, name, format!("desc for {name}"))
	}

	/// Pairwise-distinct submissions all land, and the definition set size
	/// equals the submission count.
	#[test]
	fn distinct_fragments_all_admitted() {
		let mut agg = Aggregator::new();
		let report = agg.record_all(vec![
			frag("ConditionType", 1, "One"),
			frag("ConditionType", 2, "Two"),
			frag("TargetType", 1, "TargetOne"),
		]);

		assert_eq!(report.admitted, 3);
		assert!(report.errors.is_empty());

		let sets = agg.finish().unwrap();
		assert_eq!(sets.len(), 2);
		assert_eq!(sets.get("ConditionType").unwrap().len(), 2);
		assert_eq!(sets.get("TargetType").unwrap().len(), 1);
	}

	/// Same id, different names: exactly one DuplicateId, and exactly one
	/// fragment stays registered for that identifier.
	#[test]
	fn duplicate_id_rejected() {
		let mut agg = Aggregator::new();
		agg.record(frag("T", 1, "A")).unwrap();

		let err = agg.record(frag("T", 1, "B")).unwrap_err();
		assert!(matches!(
			err,
			ConflictError::DuplicateId { id: 1, .. }
		));

		let sets = agg.finish().unwrap();
		let fragments = sets.get("T").unwrap();
		assert_eq!(fragments.len(), 1);
		assert_eq!(fragments[0].name(), "A");
	}

	/// Same name, different ids: one DuplicateName, and the rejected
	/// fragment's id is rolled back so it stays available.
	#[test]
	fn duplicate_name_rolls_back_id() {
		let mut agg = Aggregator::new();
		agg.record(frag("T", 1, "A").with_origin(Origin::decl("defs.kdl:0")))
			.unwrap();

		let err = agg
			.record(frag("T", 2, "A").with_origin(Origin::decl("defs.kdl:1")))
			.unwrap_err();
		match err {
			ConflictError::DuplicateName {
				id,
				conflicting_origin,
				..
			} => {
				assert_eq!(id, 2);
				assert_eq!(conflicting_origin, Origin::decl("defs.kdl:0"));
			}
			other => panic!("unexpected error: {other}"),
		}

		// Rollback property: id 2 is free again.
		agg.record(frag("T", 2, "B")).unwrap();
		let sets = agg.finish().unwrap();
		let names: Vec<_> = sets.get("T").unwrap().iter().map(|f| f.name()).collect();
		assert_eq!(names, ["A", "B"]);
	}

	/// Ordering is strictly increasing by identifier regardless of
	/// submission order.
	#[test]
	fn fragments_ordered_by_id() {
		let mut agg = Aggregator::new();
		agg.record(frag("T", 3, "C")).unwrap();
		agg.record(frag("T", 1, "A")).unwrap();
		agg.record(frag("T", 2, "B")).unwrap();

		let sets = agg.finish().unwrap();
		let fragments = sets.get("T").unwrap();
		let names: Vec<_> = fragments.iter().map(|f| f.name()).collect();
		assert_eq!(names, ["A", "B", "C"], "ordinal 0 is A, 1 is B, 2 is C");
		let ids: Vec<_> = fragments.iter().map(|f| f.id()).collect();
		assert_eq!(ids, [1, 2, 3]);
	}

	/// The same name may appear under different logical types.
	#[test]
	fn same_name_across_types_is_fine() {
		let mut agg = Aggregator::new();
		agg.record(frag("ConditionType", 1, "One")).unwrap();
		agg.record(frag("TargetType", 1, "One")).unwrap();
		assert_eq!(agg.len(), 2);
	}

	#[test]
	fn invalid_identifiers_rejected() {
		let mut agg = Aggregator::new();

		let err = agg.record(frag("T", 1, "not a name")).unwrap_err();
		assert!(matches!(
			err,
			ConflictError::InvalidIdentifier { field: "name", .. }
		));

		let err = agg.record(frag("enum", 1, "A")).unwrap_err();
		assert!(matches!(
			err,
			ConflictError::InvalidIdentifier { field: "type", .. }
		));

		// Rejected fragments leave no trace.
		assert!(agg.is_empty());
	}

	/// Identifier zero yields an advisory unless the name reads as a
	/// deliberate sentinel; it never blocks admission.
	#[test]
	fn zero_id_advisory() {
		let mut agg = Aggregator::new();
		agg.record(frag("T", 0, "First")).unwrap();
		agg.record(frag("U", 0, "StateUnspecified")).unwrap();
		agg.record(frag("V", 0, "Unknown")).unwrap();

		assert_eq!(
			agg.advisories(),
			&[Advisory::ZeroId {
				logical_type: String::from("T"),
				name: String::from("First"),
			}]
		);
		assert_eq!(agg.len(), 3, "advisories never block admission");
	}

	/// After finish, record and finish both report AlreadyFinalized.
	#[test]
	fn finalized_aggregator_rejects_further_work() {
		let mut agg = Aggregator::new();
		agg.record(frag("T", 1, "A")).unwrap();
		agg.finish().unwrap();

		assert!(matches!(
			agg.record(frag("T", 2, "B")),
			Err(ConflictError::AlreadyFinalized)
		));
		assert!(matches!(agg.finish(), Err(ConflictError::AlreadyFinalized)));
	}

	/// Batch feeding recovers per fragment.
	#[test]
	fn record_all_recovers_per_fragment() {
		let mut agg = Aggregator::new();
		let report = agg.record_all(vec![
			frag("T", 1, "A"),
			frag("T", 1, "B"), // duplicate id
			frag("T", 2, "A"), // duplicate name
			frag("T", 2, "B"), // fine: both rollbacks left room
		]);

		assert_eq!(report.admitted, 2);
		assert_eq!(report.errors.len(), 2);

		let sets = agg.finish().unwrap();
		let names: Vec<_> = sets.get("T").unwrap().iter().map(|f| f.name()).collect();
		assert_eq!(names, ["A", "B"]);
	}
}
