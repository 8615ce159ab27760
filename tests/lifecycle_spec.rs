use std::sync::Arc;
use std::time::Duration;

use streamline::error::StreamlineError;
use streamline::models::TranslationState;
use streamline::registry::Registry;
use streamline::service::TranslationService;

fn setup() -> TranslationService {
    TranslationService::new(Arc::new(Registry::new()))
}

/// Short grace period for race tests; waits use generous margins around it.
const TIMEOUT: Duration = Duration::from_millis(100);

mod transitions {
    use super::*;

    #[tokio::test]
    async fn created_sessions_cannot_be_interrupted() {
        let service = setup();
        let translation = service.create().expect("create failed");
        assert_eq!(translation.state, TranslationState::Created);

        let err = service.interrupt(translation.id, TIMEOUT).unwrap_err();
        assert_eq!(err, StreamlineError::NotYetActivated(translation.id));
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Created
        );
    }

    #[tokio::test]
    async fn activate_is_idempotent_on_activated_sessions() {
        let service = setup();
        let translation = service.create().expect("create failed");

        let first = service.activate(translation.id).expect("activate failed");
        assert_eq!(first.state, TranslationState::Activated);

        let second = service.activate(translation.id).expect("repeat activate failed");
        assert_eq!(second.state, TranslationState::Activated);
    }

    #[tokio::test]
    async fn interrupting_twice_is_rejected() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");

        let interrupted = service
            .interrupt(translation.id, TIMEOUT)
            .expect("interrupt failed");
        assert_eq!(interrupted.state, TranslationState::Interrupted);

        let err = service.interrupt(translation.id, TIMEOUT).unwrap_err();
        assert_eq!(err, StreamlineError::AlreadyInterrupted(translation.id));
    }

    #[tokio::test]
    async fn finished_sessions_reject_activate_and_interrupt() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");
        service
            .interrupt(translation.id, TIMEOUT)
            .expect("interrupt failed");

        tokio::time::sleep(TIMEOUT * 3).await;
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Finished
        );

        let err = service.activate(translation.id).unwrap_err();
        assert_eq!(err, StreamlineError::AlreadyFinished(translation.id));
        let err = service.interrupt(translation.id, TIMEOUT).unwrap_err();
        assert_eq!(err, StreamlineError::AlreadyFinished(translation.id));
    }
}

mod timeout_race {
    use super::*;

    #[tokio::test]
    async fn unattended_interrupt_finalizes_after_the_timeout() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");
        service
            .interrupt(translation.id, TIMEOUT)
            .expect("interrupt failed");

        // Still within the grace period.
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Interrupted
        );

        tokio::time::sleep(TIMEOUT * 3).await;
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Finished
        );
    }

    #[tokio::test]
    async fn reactivation_before_the_deadline_cancels_the_timer() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");
        service
            .interrupt(translation.id, Duration::from_millis(200))
            .expect("interrupt failed");

        tokio::time::sleep(Duration::from_millis(20)).await;
        let reactivated = service.activate(translation.id).expect("reactivate failed");
        assert_eq!(reactivated.state, TranslationState::Activated);

        // Well past the original deadline the session must still be running.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Activated
        );
    }

    #[tokio::test]
    async fn each_interruption_episode_gets_its_own_timer() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");

        // First episode is won by reactivation.
        service
            .interrupt(translation.id, Duration::from_millis(200))
            .expect("interrupt failed");
        service.activate(translation.id).expect("reactivate failed");

        // Second episode runs out and must still finalize.
        service
            .interrupt(translation.id, TIMEOUT)
            .expect("second interrupt failed");
        tokio::time::sleep(TIMEOUT * 3).await;
        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Finished
        );
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_an_unknown_id_fails_not_found() {
        let service = setup();
        let id = uuid::Uuid::new_v4();
        assert_eq!(service.delete(id).unwrap_err(), StreamlineError::NotFound(id));
    }

    #[tokio::test]
    async fn deleted_sessions_are_gone_for_every_operation() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.delete(translation.id).expect("delete failed");

        let id = translation.id;
        assert_eq!(service.get(id).unwrap_err(), StreamlineError::NotFound(id));
        assert_eq!(
            service.activate(id).unwrap_err(),
            StreamlineError::NotFound(id)
        );
        assert_eq!(
            service.interrupt(id, TIMEOUT).unwrap_err(),
            StreamlineError::NotFound(id)
        );
        assert_eq!(service.delete(id).unwrap_err(), StreamlineError::NotFound(id));
    }

    #[tokio::test]
    async fn deleting_every_session_leaves_an_empty_list() {
        let service = setup();
        for _ in 0..3 {
            service.create().expect("create failed");
        }
        assert_eq!(service.list().len(), 3);

        for translation in service.list() {
            service.delete(translation.id).expect("delete failed");
        }
        assert!(service.list().is_empty());
    }

    #[tokio::test]
    async fn deleting_an_interrupted_session_disarms_its_timer() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");
        service
            .interrupt(translation.id, TIMEOUT)
            .expect("interrupt failed");

        service.delete(translation.id).expect("delete failed");

        // The timer must not resurrect anything; the id stays unknown.
        tokio::time::sleep(TIMEOUT * 3).await;
        assert_eq!(
            service.get(translation.id).unwrap_err(),
            StreamlineError::NotFound(translation.id)
        );
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_returns_a_snapshot_of_every_session() {
        let service = setup();
        let a = service.create().expect("create failed");
        let b = service.create().expect("create failed");
        service.activate(b.id).expect("activate failed");

        let mut listed = service.list();
        listed.sort_by_key(|t| t.created_at);
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|t| t.id == a.id));
        assert!(listed
            .iter()
            .any(|t| t.id == b.id && t.state == TranslationState::Activated));
    }

    #[tokio::test]
    async fn concurrent_callers_never_corrupt_per_session_state() {
        let service = setup();
        let translation = service.create().expect("create failed");
        service.activate(translation.id).expect("activate failed");

        // Hammer one session with competing activates while an interrupt
        // episode is in flight; the deadline is far enough out that
        // reactivation always wins, and duplicate activates must all be
        // no-op successes.
        service
            .interrupt(translation.id, Duration::from_secs(30))
            .expect("interrupt failed");

        let mut workers = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            let id = translation.id;
            workers.push(tokio::spawn(async move {
                service.activate(id).expect("activate failed");
                service.get(id).expect("session vanished").state
            }));
        }
        for worker in workers {
            let state = worker.await.expect("worker panicked");
            assert_eq!(state, TranslationState::Activated);
        }

        assert_eq!(
            service.get(translation.id).unwrap().state,
            TranslationState::Activated
        );
    }
}
