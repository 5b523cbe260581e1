mod common;

use common::{body, get};
use segmux::{
    MethodFilter, Outcome, RouteError, Router, Subrouter, handlers,
    http::Method,
    testing::{CountingHandler, RecordingHandler, WriteHandler},
};

#[tokio::test]
async fn test_nested_prefixes() {
    let mut inner = Subrouter::new().with_prefix("/a");
    inner
        .handle(Method::GET, "/b/c", WriteHandler::new("deep"))
        .unwrap();

    let mut outer = Subrouter::new().with_prefix("/x");
    outer.use_subrouter(&inner).unwrap();

    let mut router = Router::new();
    router.use_subrouter(&outer).unwrap();

    let (outcome, res) = get(&router, "/x/a/b/c").await;
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(body(&res), "deep");

    let (outcome, _) = get(&router, "/a/b/c").await;
    assert_eq!(outcome, Outcome::NotFound);
}

#[tokio::test]
async fn test_router_prefix_and_common_applied_on_merge() {
    let common = CountingHandler::new();
    let recorder = RecordingHandler::new();

    let mut users = Subrouter::new().with_prefix("/users");
    users.handle(Method::GET, "/", recorder.clone()).unwrap();
    users
        .handle(Method::GET, "/:id", recorder.clone())
        .unwrap();

    let mut router = Router::new().with_prefix("/api");
    router.set_common(handlers![common.clone()]);
    router.use_subrouter(&users).unwrap();

    get(&router, "/api/users").await;
    get(&router, "/api/users/9").await;

    assert_eq!(common.count(), 2);
    let seen = recorder.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].path, "/api/users/9");
    assert_eq!(seen[1].params["id"], "9");
}

#[tokio::test]
async fn test_merge_is_atomic() {
    let mut router = Router::new();
    router
        .handle(Method::GET, "/items/:id", WriteHandler::new("item"))
        .unwrap();

    let mut sub = Subrouter::new();
    sub.handle(Method::GET, "/aaa", WriteHandler::new("fresh"))
        .unwrap();
    sub.handle(Method::GET, "/items/:slug", WriteHandler::new("clash"))
        .unwrap();

    let err = router.use_subrouter(&sub).unwrap_err();
    assert!(matches!(err, RouteError::AmbiguousParam { .. }));

    let (outcome, _) = get(&router, "/aaa").await;
    assert_eq!(outcome, Outcome::NotFound);
    let (_, res) = get(&router, "/items/1").await;
    assert_eq!(body(&res), "item");
}

#[tokio::test]
async fn test_subrouter_last_write_wins() {
    let mut sub = Subrouter::new();
    sub.handle(Method::GET, "/page", WriteHandler::new("old"))
        .unwrap();
    sub.handle(Method::GET, "/page", WriteHandler::new("new"))
        .unwrap();

    let mut router = Router::new();
    router
        .handle(Method::GET, "/page", WriteHandler::new("router"))
        .unwrap();
    router.use_subrouter(&sub).unwrap();

    let (_, res) = get(&router, "/page").await;
    assert_eq!(body(&res), "new");
}

#[tokio::test]
async fn test_any_method_in_subrouter() {
    let mut sub = Subrouter::new().with_prefix("/health");
    sub.handle(MethodFilter::Any, "/", WriteHandler::new("ok"))
        .unwrap();

    let mut router = Router::new();
    router.use_subrouter(&sub).unwrap();

    for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
        let (outcome, res) = common::send(&router, method, "/health").await;
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(body(&res), "ok");
    }
}

#[test]
fn test_dump_lists_merged_routes() {
    let mut sub = Subrouter::new().with_prefix("/x");
    sub.handle(Method::GET, "/{id:[0-9]+}", CountingHandler::new())
        .unwrap();

    let mut router = Router::new();
    router.use_subrouter(&sub).unwrap();

    let mut out = Vec::new();
    router.dump(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "GET\n/\n  /x\n    /{id:[0-9]+} [1 handlers]\n"
    );
}

#[tokio::test]
async fn test_unslashed_paths_join_under_prefixes() {
    let mut users = Subrouter::new().with_prefix("users/");
    users
        .handle(Method::GET, "list", WriteHandler::new("list"))
        .unwrap();

    let mut router = Router::new().with_prefix("/api/");
    router.use_subrouter(&users).unwrap();
    router
        .handle(Method::GET, "items", WriteHandler::new("items"))
        .unwrap();

    let (_, res) = get(&router, "/api/users/list").await;
    assert_eq!(body(&res), "list");
    let (_, res) = get(&router, "/api/items").await;
    assert_eq!(body(&res), "items");
}

#[test]
fn test_empty_path_is_rejected() {
    let mut router = Router::new();
    let err = router
        .handle(Method::GET, "", WriteHandler::new("root"))
        .unwrap_err();
    assert_eq!(err, RouteError::EmptyPattern);
}
