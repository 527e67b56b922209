use super::AnchorId;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Identifiers of the live strokes, oldest first once sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StrokeRegistry {
	ids: Vec<AnchorId>,
}

impl StrokeRegistry {
	pub fn append(&mut self, id: AnchorId) {
		if self.contains(id) {
			tracing::debug!(%id, "stroke already registered");
			return;
		}
		self.ids.push(id);
	}

	pub fn remove(&mut self, id: AnchorId) {
		self.ids.retain(|other| *other != id);
	}

	pub fn contains(&self, id: AnchorId) -> bool {
		self.ids.contains(&id)
	}

	pub fn ids(&self) -> &[AnchorId] {
		&self.ids
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Stable ascending sort by creation time. Ids `date_created` cannot resolve are dropped.
	pub fn sort_by_creation_time(&mut self, date_created: impl Fn(AnchorId) -> Option<f64>) {
		let before = self.ids.len();
		self.ids = self
			.ids
			.iter()
			.filter_map(|id| date_created(*id).map(|date| (OrderedFloat(date), *id)))
			.sorted_by_key(|(date, _)| *date)
			.map(|(_, id)| id)
			.collect();
		let dropped = before - self.ids.len();
		if dropped > 0 {
			tracing::debug!(dropped, "dropped unresolvable strokes while sorting");
		}
	}

	/// Sorts, then removes and returns the most recently created stroke.
	pub fn pop_latest(&mut self, date_created: impl Fn(AnchorId) -> Option<f64>) -> Option<AnchorId> {
		self.sort_by_creation_time(date_created);
		self.ids.pop()
	}

	/// Removes and returns every id, in registry order.
	pub fn take_all(&mut self) -> Vec<AnchorId> {
		std::mem::take(&mut self.ids)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn registry_with(dates: &[f64]) -> (StrokeRegistry, HashMap<AnchorId, f64>) {
		let mut registry = StrokeRegistry::default();
		let mut lookup = HashMap::new();
		for date in dates {
			let id = AnchorId::new_v4();
			registry.append(id);
			lookup.insert(id, *date);
		}
		(registry, lookup)
	}

	fn dates(registry: &StrokeRegistry, lookup: &HashMap<AnchorId, f64>) -> Vec<f64> {
		registry.ids().iter().map(|id| lookup[id]).collect()
	}

	#[test]
	fn test_append_is_unique() {
		let mut registry = StrokeRegistry::default();
		let id = AnchorId::new_v4();
		registry.append(id);
		registry.append(id);
		assert_eq!(registry.len(), 1);
		registry.remove(id);
		assert!(registry.is_empty());
	}

	#[test]
	fn test_sort_and_pop_latest() {
		let (mut registry, lookup) = registry_with(&[5.0, 3.0, 8.0]);
		registry.sort_by_creation_time(|id| lookup.get(&id).copied());
		assert_eq!(dates(&registry, &lookup), vec![3.0, 5.0, 8.0]);

		let latest = registry.pop_latest(|id| lookup.get(&id).copied());
		assert_eq!(latest.map(|id| lookup[&id]), Some(8.0));
		assert_eq!(dates(&registry, &lookup), vec![3.0, 5.0]);
	}

	#[test]
	fn test_sort_is_idempotent_and_stable() {
		let (mut registry, lookup) = registry_with(&[2.0, 1.0, 2.0, 1.0, 0.5]);
		let original = registry.ids().to_vec();
		registry.sort_by_creation_time(|id| lookup.get(&id).copied());
		let once = registry.clone();
		registry.sort_by_creation_time(|id| lookup.get(&id).copied());
		assert_eq!(registry, once);
		assert_eq!(
			registry.ids(),
			&[original[4], original[1], original[3], original[0], original[2]]
		);
	}

	#[test]
	fn test_sort_drops_unresolvable() {
		let (mut registry, mut lookup) = registry_with(&[1.0, 2.0]);
		let gone = registry.ids()[0];
		lookup.remove(&gone);
		registry.sort_by_creation_time(|id| lookup.get(&id).copied());
		assert_eq!(registry.len(), 1);
		assert!(!registry.contains(gone));
	}

	#[test]
	fn test_pop_latest_empty() {
		let mut registry = StrokeRegistry::default();
		assert_eq!(registry.pop_latest(|_| None), None);
	}
}
