use larder_domain::pagination::PageRequest;
use larder_recipes::domain::types::NewIngredient;
use larder_recipes::import::{parse_ingredients, parse_tags};
use larder_recipes::usecase::catalog::{
    ImportIngredientsUseCase, ImportSummary, ImportTagsUseCase, ListTagsUseCase,
    SearchIngredientsUseCase,
};

use crate::helpers::MemoryStore;

#[tokio::test]
async fn should_import_ingredients_skipping_existing_pairs() {
    let store = MemoryStore::default();
    store.seed_ingredient("Flour", "g");

    let rows = parse_ingredients("Flour,g\nFlour,kg\nSugar,g\nSugar,g\n").unwrap();
    let summary = ImportIngredientsUseCase {
        repo: store.ingredients(),
    }
    .execute(rows)
    .await
    .unwrap();

    assert_eq!(summary, ImportSummary { read: 4, inserted: 2 });
    store.with(|t| assert_eq!(t.ingredients.len(), 3));
}

#[tokio::test]
async fn should_search_imported_ingredients_by_prefix() {
    let store = MemoryStore::default();
    ImportIngredientsUseCase {
        repo: store.ingredients(),
    }
    .execute(vec![
        NewIngredient {
            name: "salt".to_owned(),
            measurement_unit: "g".to_owned(),
        },
        NewIngredient {
            name: "sugar".to_owned(),
            measurement_unit: "g".to_owned(),
        },
        NewIngredient {
            name: "milk".to_owned(),
            measurement_unit: "ml".to_owned(),
        },
    ])
    .await
    .unwrap();

    let found = SearchIngredientsUseCase {
        repo: store.ingredients(),
    }
    .execute(Some("S"), PageRequest::default())
    .await
    .unwrap();
    let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["salt", "sugar"]);
}

#[tokio::test]
async fn should_import_tags_and_list_them_by_name() {
    let store = MemoryStore::default();
    let drafts = parse_tags(
        r##"[
            {"name": "Lunch", "color": "#49B64E", "slug": "lunch"},
            {"name": "Breakfast", "color": "#E26C2D", "slug": "breakfast"},
            {"name": "Brunch", "color": "#E26C2D", "slug": "brunch"}
        ]"##,
    )
    .unwrap();

    let summary = ImportTagsUseCase { repo: store.tags() }
        .execute(drafts)
        .await
        .unwrap();
    // Brunch reuses Breakfast's color and is skipped.
    assert_eq!(summary, ImportSummary { read: 3, inserted: 2 });

    let tags = ListTagsUseCase { repo: store.tags() }.execute().await.unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Breakfast", "Lunch"]);
}
