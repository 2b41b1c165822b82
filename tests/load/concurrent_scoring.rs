//! Concurrent rating submissions against a shared roster service
//!
//! These tests check that per-player updates stay consistent when many
//! raters submit at once, and that the shared score cache stays correct.

use roster_rating::error::RosterError;
use roster_rating::roster::HistoryQuery;
use roster_rating::types::{Position, PositionGroup};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use crate::fixtures::{
    create_cached_service, create_test_service, new_player, striker_ratings, uniform_ratings,
};

#[test]
fn test_concurrent_raters_on_one_player() {
    let (service, metrics) = create_test_service();
    let service = Arc::new(service);
    let player = service
        .add_player(new_player("John Smith", "john@example.com", Position::Striker))
        .unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = service.clone();
            let player_id = player.id.clone();
            thread::spawn(move || {
                let rater = format!("rater{}@example.com", i);
                // Half rate the striker scenario (82), half uniform 70s (70)
                let ratings = if i % 2 == 0 {
                    striker_ratings()
                } else {
                    uniform_ratings(70, 2)
                };
                service.submit_rating(&rater, &player_id, ratings)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let stored = service.get_player(&player.id).unwrap();
    assert_eq!(stored.ratings.len(), 16);
    // (8 * 82 + 8 * 70) / 16 = 76
    assert_eq!(stored.overall_rating, Some(76));
    assert_eq!(
        service.rating_history(&HistoryQuery::default()).unwrap().len(),
        16
    );
    assert_eq!(metrics.submissions().submissions_total.get(), 16);
}

#[test]
fn test_concurrent_submissions_across_players() {
    let (service, calculator, _metrics) = create_cached_service(256);
    let service = Arc::new(service);

    let positions = [
        Position::Goalkeeper,
        Position::CentreBack,
        Position::CentralMidfielder,
        Position::Striker,
    ];
    let players: Vec<_> = positions
        .iter()
        .enumerate()
        .map(|(i, position)| {
            service
                .add_player(new_player(
                    &format!("Player {}", i),
                    &format!("player{}@example.com", i),
                    *position,
                ))
                .unwrap()
        })
        .collect();

    let start = Instant::now();
    let handles: Vec<_> = (0..8)
        .map(|rater| {
            let service = service.clone();
            let ids: Vec<_> = players.iter().map(|p| p.id.clone()).collect();
            thread::spawn(move || {
                let email = format!("rater{}@example.com", rater);
                for id in &ids {
                    for _ in 0..25 {
                        service
                            .submit_rating(&email, id, striker_ratings())
                            .unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    let elapsed = start.elapsed();

    let board = service.leaderboard(PositionGroup::Overall).unwrap();
    let overalls: Vec<(Position, i32)> = board
        .iter()
        .map(|entry| (entry.position, entry.overall_rating))
        .collect();
    assert_eq!(
        overalls,
        vec![
            (Position::Striker, 82),
            (Position::CentralMidfielder, 78),
            (Position::CentreBack, 76),
            (Position::Goalkeeper, 75),
        ]
    );

    for player in &players {
        assert_eq!(service.get_player(&player.id).unwrap().ratings.len(), 8);
    }

    use roster_rating::rating::ScoreCache;
    assert_eq!(calculator.cache().entry_count().unwrap(), 4);

    // 800 submissions should be far below this even on slow CI machines
    assert!(elapsed < Duration::from_secs(10), "took {:?}", elapsed);
}

#[test]
fn test_concurrent_adds_with_same_email_admit_one_player() {
    const THREADS: usize = 8;

    for _ in 0..200 {
        let (service, _metrics) = create_test_service();
        let service = Arc::new(service);
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let service = service.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    service.add_player(new_player(
                        &format!("Player {}", i),
                        "same@example.com",
                        Position::Striker,
                    ))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let added = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(added, 1);
        for err in results.iter().filter_map(|result| result.as_ref().err()) {
            assert!(matches!(
                err.downcast_ref::<RosterError>(),
                Some(RosterError::DuplicatePlayer { .. })
            ));
        }
        assert_eq!(service.search_players("").unwrap().len(), 1);
    }
}

#[test]
fn test_concurrent_email_changes_keep_emails_unique() {
    const THREADS: usize = 8;

    for _ in 0..100 {
        let (service, _metrics) = create_test_service();
        let service = Arc::new(service);
        let players: Vec<_> = (0..THREADS)
            .map(|i| {
                service
                    .add_player(new_player(
                        &format!("Player {}", i),
                        &format!("player{}@example.com", i),
                        Position::Striker,
                    ))
                    .unwrap()
            })
            .collect();
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = players
            .into_iter()
            .map(|player| {
                let service = service.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    service.update_player(
                        &player.id,
                        new_player(&player.name, "taken@example.com", Position::Striker),
                    )
                })
            })
            .collect();

        let updated = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|result| result.is_ok())
            .count();
        assert_eq!(updated, 1);

        let holders = service
            .search_players("taken@example.com")
            .unwrap()
            .len();
        assert_eq!(holders, 1);
    }
}
