use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::domain::types::{CartLine, ShoppingListItem};

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Sum cart lines per ingredient in one pass, counting distinct recipes.
///
/// Output is ordered by ingredient name, then unit.
pub fn aggregate_shopping_list(lines: &[CartLine]) -> Vec<ShoppingListItem> {
    struct Group<'a> {
        name: &'a str,
        measurement_unit: &'a str,
        total: i64,
        recipes: HashSet<i32>,
    }

    let mut groups: HashMap<i32, Group<'_>> = HashMap::new();
    for line in lines {
        let group = groups.entry(line.ingredient_id).or_insert_with(|| Group {
            name: &line.name,
            measurement_unit: &line.measurement_unit,
            total: 0,
            recipes: HashSet::new(),
        });
        group.total += i64::from(line.amount);
        group.recipes.insert(line.recipe_id);
    }

    let mut items: Vec<ShoppingListItem> = groups
        .into_values()
        .map(|g| ShoppingListItem {
            name: g.name.to_owned(),
            measurement_unit: g.measurement_unit.to_owned(),
            total: g.total,
            recipe_count: g.recipes.len(),
        })
        .collect();
    items.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
    });
    items
}

/// Plain-text download body, one newline-terminated line per item.
pub fn render_shopping_list(items: &[ShoppingListItem]) -> String {
    let mut out = String::new();
    for item in items {
        let noun = if item.recipe_count == 1 {
            "recipe"
        } else {
            "recipes"
        };
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "{} {} — {} (in {} {noun})",
            item.name, item.measurement_unit, item.total, item.recipe_count
        );
    }
    out
}
