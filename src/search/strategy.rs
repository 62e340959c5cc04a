use crate::search::{Comparator, EntryId, OpenList};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub type Cost = OrderedFloat<f64>;

/// What the open list holds: a handle to a frontier entry plus the costs it
/// was ranked by when pushed. Two open entries are equal when they refer to
/// the same frontier entry.
#[derive(Debug, Clone, Copy)]
pub struct OpenEntry {
    pub entry: EntryId,
    pub heuristic_cost: Cost,
    pub path_cost: Cost,
    pub rank_cost: Cost,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
    }
}

impl Eq for OpenEntry {}

/// The expansion order used by [`crate::search::PathSearch`].
#[derive(
    clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    #[clap(help = "Expand in discovery order; finds the fewest hops.")]
    BreadthFirst,
    #[clap(help = "Expand the cell that looks closest to the goal.")]
    GreedyBestFirst,
    #[clap(help = "Dijkstra: expand the cheapest known path first.")]
    UniformCost,
    #[clap(name = "a-star", help = "Expand by path cost plus weighted heuristic.")]
    #[serde(rename = "a-star", alias = "astar")]
    AStar,
}

impl SearchStrategy {
    pub fn all() -> impl Iterator<Item = SearchStrategy> {
        SearchStrategy::iter()
    }

    /// Whether already visited cells are re-examined when a cheaper path to
    /// them turns up.
    pub fn is_cost_aware(&self) -> bool {
        matches!(self, SearchStrategy::UniformCost | SearchStrategy::AStar)
    }

    /// Factor applied to the straight-line distance to the goal.
    pub fn heuristic_scale(&self, heuristic_weight: f64) -> f64 {
        match self {
            SearchStrategy::GreedyBestFirst | SearchStrategy::AStar => heuristic_weight,
            SearchStrategy::BreadthFirst | SearchStrategy::UniformCost => 1.,
        }
    }

    pub fn rank(&self, heuristic_cost: Cost, path_cost: Cost) -> Cost {
        match self {
            SearchStrategy::BreadthFirst => OrderedFloat(0.),
            SearchStrategy::GreedyBestFirst => heuristic_cost,
            SearchStrategy::UniformCost => path_cost,
            SearchStrategy::AStar => heuristic_cost + path_cost,
        }
    }

    pub fn comparator(&self) -> Option<Comparator<OpenEntry>> {
        match self {
            SearchStrategy::BreadthFirst => None,
            SearchStrategy::GreedyBestFirst => Some(compare_heuristic),
            SearchStrategy::UniformCost => Some(compare_path),
            SearchStrategy::AStar => Some(compare_a_star),
        }
    }

    pub fn open_list(&self) -> OpenList<OpenEntry> {
        match self.comparator() {
            Some(compare) => OpenList::new(compare),
            None => OpenList::fifo(),
        }
    }
}

fn compare_heuristic(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.heuristic_cost.cmp(&b.heuristic_cost)
}

fn compare_path(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.path_cost.cmp(&b.path_cost)
}

/// Rank first, then the smaller heuristic, then the larger path cost already
/// paid.
fn compare_a_star(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    a.rank_cost
        .cmp(&b.rank_cost)
        .then_with(|| a.heuristic_cost.cmp(&b.heuristic_cost))
        .then_with(|| b.path_cost.cmp(&a.path_cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(entry: usize, h: f64, g: f64, strategy: SearchStrategy) -> OpenEntry {
        OpenEntry {
            entry: EntryId::from_index(entry),
            heuristic_cost: OrderedFloat(h),
            path_cost: OrderedFloat(g),
            rank_cost: strategy.rank(OrderedFloat(h), OrderedFloat(g)),
        }
    }

    fn pop_order(strategy: SearchStrategy, entries: &[(f64, f64)]) -> Vec<usize> {
        let mut list = strategy.open_list();
        for (index, &(h, g)) in entries.iter().enumerate() {
            list.push(open(index, h, g, strategy));
        }
        let mut order = vec![];
        while let Ok(entry) = list.pop_best() {
            order.push(entry.entry.index());
        }
        order
    }

    #[test]
    fn only_breadth_first_is_fifo() {
        for strategy in SearchStrategy::all() {
            assert_eq!(
                strategy.open_list().is_fifo(),
                strategy == SearchStrategy::BreadthFirst
            );
        }
    }

    #[test]
    fn cost_awareness() {
        let aware: Vec<SearchStrategy> =
            SearchStrategy::all().filter(|s| s.is_cost_aware()).collect();
        assert_eq!(aware, vec![SearchStrategy::UniformCost, SearchStrategy::AStar]);
    }

    #[test]
    fn heuristic_weight_only_scales_informed_strategies() {
        assert_eq!(SearchStrategy::AStar.heuristic_scale(2.), 2.);
        assert_eq!(SearchStrategy::GreedyBestFirst.heuristic_scale(3.), 3.);
        assert_eq!(SearchStrategy::UniformCost.heuristic_scale(2.), 1.);
        assert_eq!(SearchStrategy::BreadthFirst.heuristic_scale(2.), 1.);
    }

    #[test]
    fn greedy_orders_by_heuristic_only() {
        let order = pop_order(
            SearchStrategy::GreedyBestFirst,
            &[(3., 0.), (1., 100.), (2., 1.)],
        );
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn uniform_cost_orders_by_path_only() {
        let order = pop_order(SearchStrategy::UniformCost, &[(0., 3.), (100., 1.), (1., 2.)]);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn breadth_first_pops_in_push_order() {
        let order = pop_order(SearchStrategy::BreadthFirst, &[(9., 9.), (0., 0.), (5., 1.)]);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn a_star_breaks_ties_by_heuristic_then_larger_path_cost() {
        // All three rank at 10.
        let order = pop_order(SearchStrategy::AStar, &[(6., 4.), (4., 6.), (5., 5.)]);
        assert_eq!(order, vec![1, 2, 0]);

        let a = open(0, 4., 6., SearchStrategy::AStar);
        let mut b = open(1, 4., 6., SearchStrategy::AStar);
        b.path_cost = OrderedFloat(7.);
        assert_eq!(compare_a_star(&b, &a), Ordering::Less);
        assert_eq!(compare_a_star(&a, &b), Ordering::Greater);

        let order = pop_order(SearchStrategy::AStar, &[(1., 1.), (5., 5.), (0., 1.)]);
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn open_entries_compare_by_handle() {
        let a = open(3, 1., 1., SearchStrategy::AStar);
        let b = open(3, 9., 9., SearchStrategy::AStar);
        assert_eq!(a, b);
        assert_ne!(a, open(4, 1., 1., SearchStrategy::AStar));
    }

    #[test]
    fn strategy_names() {
        use clap::ValueEnum;
        let names: Vec<String> = SearchStrategy::value_variants()
            .iter()
            .filter_map(|s| s.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["breadth-first", "greedy-best-first", "uniform-cost", "a-star"]
        );
    }
}
