//! Cross-layer tests: database snapshot loading through the navigation index
//! and the HTTP surface.
//!
//! Each test creates its own in-memory SQLite database so tests are fully isolated.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone, Utc};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use crate::db::pool::{create_pool, run_migrations};
    use crate::db::queries::{channels, members, profiles};
    use crate::engine::directory::{Directory, DirectoryError};
    use crate::engine::model::MemberRole;
    use crate::engine::navigation::{
        self, AUDIO_CHANNELS_LABEL, MEMBERS_LABEL, TEXT_CHANNELS_LABEL, VIDEO_CHANNELS_LABEL,
    };
    use crate::engine::validation::{CreateServerForm, Limits};
    use crate::web::app_state::AppState;
    use crate::web::router::build_router;

    // ── Helpers ──────────────────────────────────────────────────

    async fn setup_db() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn setup_directory() -> Directory {
        Directory::new(setup_db().await, Limits::default())
    }

    fn form(name: &str) -> CreateServerForm {
        CreateServerForm {
            name: name.into(),
            image_url: "https://img.example/server.png".into(),
        }
    }

    /// Insert channels directly with controlled timestamps, interleaving types.
    async fn seed_channels(pool: &SqlitePool, server_id: &str, count: usize) -> Vec<String> {
        let base = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let kinds = ["TEXT", "AUDIO", "VIDEO", "TEXT", "VIDEO"];
        let mut ids = Vec::new();
        for i in 0..count {
            let id = format!("{server_id}-c{i:02}");
            channels::create_channel(
                pool,
                &id,
                server_id,
                &format!("room{i}"),
                kinds[i % kinds.len()],
                base + Duration::seconds(i as i64),
            )
            .await
            .unwrap();
            ids.push(id);
        }
        ids
    }

    // ═══════════════════════════════════════════════════════════════
    //  1. Snapshot → index properties against real storage
    // ═══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn test_partition_covers_every_stored_channel_in_order() {
        let dir = setup_directory().await;
        let owner = dir.create_profile("Owner").await.unwrap();
        let server = dir.create_server(&owner.id, &form("Big")).await.unwrap();
        let seeded = seed_channels(dir.pool(), &server.id, 12).await;

        let snapshot = dir.load_snapshot(&server.id).await.unwrap().unwrap();
        let index = navigation::build(&snapshot, &owner.id);

        let mut all = Vec::new();
        for label in [TEXT_CHANNELS_LABEL, AUDIO_CHANNELS_LABEL, VIDEO_CHANNELS_LABEL] {
            let ids: Vec<&str> = index.entries(label).iter().map(|e| e.id.as_str()).collect();
            // Relative order within a type follows the snapshot order
            let positions: Vec<usize> = ids
                .iter()
                .map(|id| snapshot.channels.iter().position(|c| c.id == *id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{label} out of order");
            all.extend(ids);
        }

        // 12 seeded plus the default general channel
        assert_eq!(all.len(), 13);
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(unique.len(), 13);
        for id in &seeded {
            assert!(unique.contains(id.as_str()));
        }
    }

    #[tokio::test]
    async fn test_members_section_follows_role_order_without_viewer() {
        let dir = setup_directory().await;
        let owner = dir.create_profile("Owner").await.unwrap();
        let server = dir.create_server(&owner.id, &form("Guild")).await.unwrap();

        let mut guests = Vec::new();
        for name in ["Gus", "Gia", "Mo"] {
            let p = dir.create_profile(name).await.unwrap();
            dir.join_by_invite(&server.invite_code, &p.id).await.unwrap();
            guests.push(p);
        }
        dir.set_member_role(&server.id, &owner.id, &guests[2].id, MemberRole::Moderator)
            .await
            .unwrap();

        let as_gus = dir.sidebar(&server.id, &guests[0].id).await.unwrap().unwrap();
        let names: Vec<&str> = as_gus
            .navigation
            .entries(MEMBERS_LABEL)
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Owner", "Mo", "Gia"]);
    }

    #[tokio::test]
    async fn test_outsider_sees_all_members() {
        let dir = setup_directory().await;
        let owner = dir.create_profile("Owner").await.unwrap();
        let outsider = dir.create_profile("Outsider").await.unwrap();
        let server = dir.create_server(&owner.id, &form("Guild")).await.unwrap();

        let sidebar = dir.sidebar(&server.id, &outsider.id).await.unwrap().unwrap();
        assert_eq!(sidebar.viewer_role, None);
        assert_eq!(sidebar.navigation.entries(MEMBERS_LABEL).len(), 1);
    }

    #[tokio::test]
    async fn test_same_profile_gets_distinct_ids_per_server() {
        let dir = setup_directory().await;
        let alice = dir.create_profile("Alice").await.unwrap();
        let bob = dir.create_profile("Bob").await.unwrap();
        let first = dir.create_server(&alice.id, &form("One")).await.unwrap();
        let second = dir.create_server(&alice.id, &form("Two")).await.unwrap();

        let a = dir.sidebar(&first.id, &bob.id).await.unwrap().unwrap();
        let b = dir.sidebar(&second.id, &bob.id).await.unwrap().unwrap();

        let id_a = &a.navigation.entries(MEMBERS_LABEL)[0].id;
        let id_b = &b.navigation.entries(MEMBERS_LABEL)[0].id;
        assert_ne!(id_a, id_b);
        assert_ne!(id_a, &alice.id);
    }

    #[tokio::test]
    async fn test_each_call_reads_fresh_data() {
        let dir = setup_directory().await;
        let alice = dir.create_profile("Alice").await.unwrap();
        let server = dir.create_server(&alice.id, &form("Guild")).await.unwrap();

        let before = dir.sidebar(&server.id, &alice.id).await.unwrap().unwrap();
        assert!(before.navigation.entries(VIDEO_CHANNELS_LABEL).is_empty());

        dir.create_channel(&server.id, &alice.id, "stage", "VIDEO")
            .await
            .unwrap();

        let after = dir.sidebar(&server.id, &alice.id).await.unwrap().unwrap();
        assert_eq!(after.navigation.entries(VIDEO_CHANNELS_LABEL).len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_channel_type_fails_whole_build() {
        let dir = setup_directory().await;
        let alice = dir.create_profile("Alice").await.unwrap();
        let server = dir.create_server(&alice.id, &form("Guild")).await.unwrap();
        channels::create_channel(dir.pool(), "bad", &server.id, "forum", "FORUM", Utc::now())
            .await
            .unwrap();

        let err = dir.sidebar(&server.id, &alice.id).await.unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidData(_)));
    }

    // ═══════════════════════════════════════════════════════════════
    //  2. Raw storage → HTTP
    // ═══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn test_http_reports_integrity_fault_as_500() {
        let pool = setup_db().await;
        profiles::create_profile(&pool, "p1", "Alice").await.unwrap();
        sqlx::query(
            "INSERT INTO servers (id, name, image_url, invite_code, owner_profile_id) \
             VALUES ('s1', 'Test', 'https://img/x.png', 'inv', 'p1')",
        )
        .execute(&pool)
        .await
        .unwrap();
        members::add_member(&pool, "m1", "s1", "p1", "OWNER").await.unwrap();

        let router = build_router(Arc::new(AppState {
            directory: Directory::new(pool, Limits::default()),
            identity_header: "x-profile-id".into(),
            public_url: "http://localhost:8080".into(),
        }));

        let resp = router
            .oneshot(
                Request::builder()
                    .uri("/api/servers/s1/navigation")
                    .header("x-profile-id", "p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Invalid server data");
    }

    #[tokio::test]
    async fn test_custom_identity_header() {
        let pool = setup_db().await;
        profiles::create_profile(&pool, "p1", "Alice").await.unwrap();

        let router = build_router(Arc::new(AppState {
            directory: Directory::new(pool, Limits::default()),
            identity_header: "x-forwarded-profile".into(),
            public_url: "https://chat.example.com".into(),
        }));

        let resp = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/servers")
                    .header("x-profile-id", "p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = router
            .oneshot(
                Request::builder()
                    .uri("/api/servers")
                    .header("X-Forwarded-Profile", "p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
