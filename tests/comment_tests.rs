use disaster_impact::comments::{Comment, CommentStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

#[test]
fn test_append_and_read_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = CommentStore::open(dir.path().join("comments.csv")).unwrap();

    store
        .append(&Comment::new("2024-01-05", "enchente", "Perdemos tudo"))
        .unwrap();
    store
        .append(&Comment::new("2024-02-10", "deslizamento", "Rua, casa e \"quintal\""))
        .unwrap();

    let comments = store.read_all().unwrap();

    assert_eq!(
        comments,
        vec![
            Comment::new("2024-01-05", "enchente", "Perdemos tudo"),
            Comment::new("2024-02-10", "deslizamento", "Rua, casa e \"quintal\""),
        ]
    );
}

#[test]
fn test_reopen_sees_previous_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("comments.csv");

    CommentStore::open(&path)
        .unwrap()
        .append(&Comment::new("2024-01-05", "seca", "Sem agua"))
        .unwrap();

    let reopened = CommentStore::open(&path).unwrap();
    assert_eq!(reopened.read_all().unwrap().len(), 1);
}

#[test]
fn test_concurrent_appends_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CommentStore::open(dir.path().join("comments.csv")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    store
                        .append(&Comment::new(
                            "2024-03-01",
                            format!("worker-{}", worker),
                            format!("entry {}", i),
                        ))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let comments = store.read_all().unwrap();
    assert_eq!(comments.len(), 8 * 25);

    // Each writer's entries stay in its own order
    for worker in 0..8 {
        let cause = format!("worker-{}", worker);
        let mine: Vec<&str> = comments
            .iter()
            .filter(|c| c.cause == cause)
            .map(|c| c.comment.as_str())
            .collect();
        let expected: Vec<String> = (0..25).map(|i| format!("entry {}", i)).collect();
        assert_eq!(mine, expected);
    }
}

#[test]
fn test_separate_handles_share_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.csv");
    let first = CommentStore::open(&path).unwrap();
    let second = CommentStore::open(&path).unwrap();

    first.append(&Comment::new("d1", "c1", "one")).unwrap();
    second.append(&Comment::new("d2", "c2", "two")).unwrap();

    let all = first.read_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].comment, "two");
}
