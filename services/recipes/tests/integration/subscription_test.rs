use uuid::Uuid;

use larder_domain::pagination::PageRequest;
use larder_recipes::error::RecipesServiceError;
use larder_recipes::usecase::subscription::{
    GetSubscriptionUseCase, ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};
use larder_recipes::usecase::user::GetUserUseCase;

use crate::helpers::{MemoryStore, publish};

#[tokio::test]
async fn should_subscribe_and_reject_duplicates_and_self() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let chef = store.seed_user("chef");
    let uc = SubscribeUseCase {
        repo: store.subscriptions(),
    };

    uc.execute(reader.id, chef.id).await.unwrap();
    assert!(matches!(
        uc.execute(reader.id, chef.id).await,
        Err(RecipesServiceError::AlreadySubscribed)
    ));
    assert!(matches!(
        uc.execute(reader.id, reader.id).await,
        Err(RecipesServiceError::SelfSubscription)
    ));
    store.with(|t| assert_eq!(t.subscriptions, vec![(reader.id, chef.id)]));
}

#[tokio::test]
async fn should_return_user_not_found_for_missing_author() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let uc = SubscribeUseCase {
        repo: store.subscriptions(),
    };
    assert!(matches!(
        uc.execute(reader.id, Uuid::now_v7()).await,
        Err(RecipesServiceError::UserNotFound)
    ));
}

#[tokio::test]
async fn should_unsubscribe_once() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let chef = store.seed_user("chef");
    SubscribeUseCase {
        repo: store.subscriptions(),
    }
    .execute(reader.id, chef.id)
    .await
    .unwrap();

    let uc = UnsubscribeUseCase {
        repo: store.subscriptions(),
    };
    uc.execute(reader.id, chef.id).await.unwrap();
    assert!(matches!(
        uc.execute(reader.id, chef.id).await,
        Err(RecipesServiceError::NotSubscribed)
    ));
}

#[tokio::test]
async fn should_list_followed_authors_with_limited_recipes_and_counts() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let chef = store.seed_user("chef");
    let baker = store.seed_user("baker");
    let flour = store.seed_ingredient("Flour", "g");
    for name in ["Soup", "Stew", "Curry"] {
        publish(&store, &chef, name, &[(flour.id, 1)], &[]).await;
    }
    let subscribe = SubscribeUseCase {
        repo: store.subscriptions(),
    };
    subscribe.execute(reader.id, chef.id).await.unwrap();
    subscribe.execute(reader.id, baker.id).await.unwrap();

    let uc = ListSubscriptionsUseCase {
        repo: store.subscriptions(),
        recipes: store.recipes(),
    };
    let views = uc
        .execute(reader.id, Some(2), PageRequest::default())
        .await
        .unwrap();

    // Most recently followed first.
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].author.id, baker.id);
    assert_eq!(views[0].recipes_count, 0);
    assert!(views[0].recipes.is_empty());

    assert_eq!(views[1].author.id, chef.id);
    assert_eq!(views[1].recipes_count, 3);
    let names: Vec<_> = views[1].recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Curry", "Stew"]);

    let unlimited = uc
        .execute(reader.id, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(unlimited[1].recipes.len(), 3);
}

#[tokio::test]
async fn should_describe_followed_author_after_subscribing() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let chef = store.seed_user("chef");
    let flour = store.seed_ingredient("Flour", "g");
    for name in ["Soup", "Stew", "Curry"] {
        publish(&store, &chef, name, &[(flour.id, 1)], &[]).await;
    }
    SubscribeUseCase {
        repo: store.subscriptions(),
    }
    .execute(reader.id, chef.id)
    .await
    .unwrap();

    let uc = GetSubscriptionUseCase {
        users: store.users(),
        recipes: store.recipes(),
    };
    let view = uc.execute(chef.id, Some(1)).await.unwrap();
    assert_eq!(view.author.id, chef.id);
    assert_eq!(view.recipes_count, 3);
    let names: Vec<_> = view.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Curry"]);

    assert_eq!(uc.execute(chef.id, None).await.unwrap().recipes.len(), 3);
    assert!(matches!(
        uc.execute(Uuid::now_v7(), None).await,
        Err(RecipesServiceError::UserNotFound)
    ));
}

#[tokio::test]
async fn should_report_is_subscribed_relative_to_viewer() {
    let store = MemoryStore::default();
    let reader = store.seed_user("reader");
    let chef = store.seed_user("chef");
    SubscribeUseCase {
        repo: store.subscriptions(),
    }
    .execute(reader.id, chef.id)
    .await
    .unwrap();

    let uc = GetUserUseCase {
        repo: store.users(),
        subscriptions: store.subscriptions(),
    };
    assert!(uc.execute(Some(reader.id), chef.id).await.unwrap().is_subscribed);
    assert!(!uc.execute(Some(chef.id), reader.id).await.unwrap().is_subscribed);
    assert!(!uc.execute(None, chef.id).await.unwrap().is_subscribed);
}
