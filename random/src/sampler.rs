use indexmap::IndexMap;
use std::hash::Hash;

// WeightedSampler is a set for weighted random sampling that can add and remove elements.
// The probability of drawing an element is its weight divided by the total weight.
// Elements are scanned in insertion order so a given random number always selects the same element.
#[derive(Clone, Debug)]
pub struct WeightedSampler<T: Hash + Eq> {
    elements: IndexMap<T, f64>,
    total_weight: f64,
}

impl<T: Hash + Eq> Default for WeightedSampler<T> {
    fn default() -> Self {
        WeightedSampler { elements: IndexMap::new(), total_weight: 0. }
    }
}

impl<T: Hash + Eq> WeightedSampler<T> {
    pub fn new() -> WeightedSampler<T> {
        WeightedSampler::default()
    }

    // add inserts an element or updates the weight of an element already in the set
    pub fn add(&mut self, value: T, weight: f64) {
        if let Some(previous) = self.elements.insert(value, weight) {
            self.total_weight -= previous;
        }
        self.total_weight += weight;
    }

    pub fn contains(&self, value: &T) -> bool {
        self.elements.contains_key(value)
    }

    pub fn weight(&self, value: &T) -> Option<f64> {
        self.elements.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    // get_random returns the first element whose cumulative weight reaches r * total_weight
    pub fn get_random(&self, r: f64) -> Option<&T> {
        let index = self.random_index(r)?;
        self.elements.get_index(index).map(|(value, _)| value)
    }

    pub fn delete(&mut self, value: &T) -> Option<f64> {
        let weight = self.elements.swap_remove(value)?;
        self.total_weight -= weight;
        if self.elements.is_empty() {
            self.total_weight = 0.;
        }
        Some(weight)
    }

    // delete_random removes and returns a weighted random element
    pub fn delete_random(&mut self, r: f64) -> Option<T> {
        let index = self.random_index(r)?;
        let (value, weight) = self.elements.swap_remove_index(index)?;
        self.total_weight -= weight;
        if self.elements.is_empty() {
            self.total_weight = 0.;
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &f64)> {
        self.elements.iter()
    }

    fn random_index(&self, r: f64) -> Option<usize> {
        if self.elements.is_empty() {
            return None;
        }
        let target = r * self.total_weight;
        let mut sum = 0.;
        for (index, weight) in self.elements.values().enumerate() {
            sum += weight;
            if sum >= target {
                return Some(index);
            }
        }
        // rounding can leave the running sum just short of the target
        Some(self.elements.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::{Prng, SeededRandom};
    use common::approx_eq;

    #[test]
    fn test_sampler_add_update_delete() {
        let mut sampler = WeightedSampler::new();
        sampler.add("a", 1.);
        sampler.add("b", 2.);
        sampler.add("c", 3.);
        approx_eq!(f64, 6., sampler.total_weight());
        assert_eq!(3, sampler.len());

        sampler.add("b", 5.);
        approx_eq!(f64, 9., sampler.total_weight());
        assert_eq!(Some(5.), sampler.weight(&"b"));
        assert_eq!(3, sampler.len());

        assert_eq!(Some(1.), sampler.delete(&"a"));
        assert_eq!(None, sampler.delete(&"a"));
        approx_eq!(f64, 8., sampler.total_weight());
        assert!(!sampler.contains(&"a"));
        assert!(sampler.contains(&"c"));
    }

    #[test]
    fn test_sampler_get_random() {
        let mut sampler = WeightedSampler::new();
        assert_eq!(None, sampler.get_random(0.5));
        sampler.add(1, 1.);
        sampler.add(2, 2.);
        sampler.add(3, 1.);
        assert_eq!(Some(&1), sampler.get_random(0.));
        assert_eq!(Some(&1), sampler.get_random(0.25));
        assert_eq!(Some(&2), sampler.get_random(0.26));
        assert_eq!(Some(&2), sampler.get_random(0.75));
        assert_eq!(Some(&3), sampler.get_random(0.76));
        assert_eq!(Some(&3), sampler.get_random(1.));
    }

    #[test]
    fn test_sampler_delete_random() {
        let mut sampler = WeightedSampler::new();
        assert_eq!(None, sampler.delete_random(0.5));
        for i in 0..10 {
            sampler.add(i, (i + 1) as f64);
        }
        let mut rng = SeededRandom::new(99);
        let mut drawn = vec![];
        while let Some(value) = sampler.delete_random(rng.next_f64()) {
            drawn.push(value);
        }
        drawn.sort_unstable();
        assert_eq!((0..10).collect::<Vec<i32>>(), drawn);
        assert!(sampler.is_empty());
        approx_eq!(f64, 0., sampler.total_weight());
    }

    #[test]
    fn test_sampler_distribution() {
        let mut sampler = WeightedSampler::new();
        sampler.add("light", 1.);
        sampler.add("heavy", 3.);
        let mut rng = SeededRandom::new(2024);
        let heavy = (0..4000).filter(|_| sampler.get_random(rng.next_f64()) == Some(&"heavy")).count();
        assert!((2800..3200).contains(&heavy), "heavy drawn {} times", heavy);
    }
}
