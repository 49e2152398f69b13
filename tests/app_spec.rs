use carom::app::{App, Event, Outcome};
use carom::config::Config;
use carom::db::Database;
use carom::error::CaromError;
use carom::models::*;
use speculate2::speculate;

fn enter(app: &mut App<Database>, keys: &str) {
    for key in keys.chars() {
        app.dispatch(Event::Digit(key)).expect("Failed to stage digit");
    }
}

fn commit_and_skip(app: &mut App<Database>, keys: &str) {
    enter(app, keys);
    app.dispatch(Event::Commit).expect("Failed to commit");
    app.dispatch(Event::SelectReason(ReasonChoice::Skip)).expect("Failed to skip");
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        let mut app = App::open(db.clone(), Config::default()).expect("Failed to open app");
    }

    describe "staging" {
        it "reports the staged value" {
            assert_eq!(app.dispatch(Event::Digit('0')).expect("Dispatch failed"), Outcome::Staged(0));
            assert_eq!(app.dispatch(Event::Digit('7')).expect("Dispatch failed"), Outcome::Staged(7));
            assert_eq!(app.dispatch(Event::Digit('2')).expect("Dispatch failed"), Outcome::Staged(72));
            assert_eq!(app.dispatch(Event::Backspace).expect("Dispatch failed"), Outcome::Staged(7));
            assert_eq!(app.dispatch(Event::Clear).expect("Dispatch failed"), Outcome::Staged(0));
            assert_eq!(app.staged(), "0");
        }

        it "ignores non-digit keys" {
            assert_eq!(app.dispatch(Event::Digit('k')).expect("Dispatch failed"), Outcome::Ignored);
        }
    }

    describe "commit" {
        it "records the staged score and offers the catalog" {
            enter(&mut app, "12");

            let outcome = app.dispatch(Event::Commit).expect("Failed to commit");

            match outcome {
                Outcome::ChooseReason { turn, choices } => {
                    assert_eq!(turn, Turn::new(1, 12, None));
                    assert_eq!(choices.len(), 5);
                }
                other => panic!("unexpected outcome {:?}", other),
            }
            assert_eq!(app.staged(), "0");
            assert_eq!(app.stats().total_score, 12);
        }

        it "records a zero when nothing was staged" {
            app.dispatch(Event::Commit).expect("Failed to commit");
            assert_eq!(app.stats().zero_count, 1);
        }

        it "gates input until a reason is chosen" {
            enter(&mut app, "3");
            app.dispatch(Event::Commit).expect("Failed to commit");

            for event in [Event::Digit('4'), Event::Commit, Event::EndSession, Event::Reset, Event::Clear] {
                assert_eq!(app.dispatch(event).expect("Dispatch failed"), Outcome::AwaitingReason);
            }
            assert_eq!(app.stats().turn_count, 1);
            assert_eq!(app.staged(), "0");

            app.dispatch(Event::SelectReason(ReasonChoice::Skip)).expect("Failed to skip");
            assert_eq!(app.dispatch(Event::Digit('4')).expect("Dispatch failed"), Outcome::Staged(4));
        }

        it "attaches the chosen label by value" {
            app.dispatch(Event::Commit).expect("Failed to commit");
            let outcome = app
                .dispatch(Event::SelectReason(ReasonChoice::Catalog(4)))
                .expect("Failed to select");

            assert_eq!(outcome, Outcome::TurnSettled(Turn::new(1, 0, Some("Kiss".to_string()))));
        }

        it "ignores a reason selection with nothing pending" {
            let outcome = app
                .dispatch(Event::SelectReason(ReasonChoice::Catalog(0)))
                .expect("Dispatch failed");
            assert_eq!(outcome, Outcome::Ignored);
        }
    }

    describe "end session" {
        it "silently ignores an empty session" {
            assert_eq!(app.dispatch(Event::EndSession).expect("Dispatch failed"), Outcome::Ignored);
            assert!(app.history().is_empty());
        }

        it "archives and starts over" {
            commit_and_skip(&mut app, "2");
            commit_and_skip(&mut app, "5");
            commit_and_skip(&mut app, "3");

            match app.dispatch(Event::EndSession).expect("Failed to end") {
                Outcome::Archived(archived) => {
                    assert_eq!(archived.index, 0);
                    assert_eq!(archived.summary, 3.33);
                }
                other => panic!("unexpected outcome {:?}", other),
            }
            assert_eq!(app.stats().turn_count, 0);
            assert_eq!(app.history().summaries(), &[3.33]);
        }

        it "keeps archived reasons when the catalog changes" {
            app.dispatch(Event::Commit).expect("Failed to commit");
            app.dispatch(Event::SelectReason(ReasonChoice::Catalog(0))).expect("Failed to select");
            app.dispatch(Event::EndSession).expect("Failed to end");

            app.dispatch(Event::DeleteReason(0)).expect("Failed to delete");

            let detail = app.history().detail_at(0).expect("Missing detail");
            assert_eq!(detail.turns[0].reason.as_deref(), Some("Too thin"));
        }
    }

    describe "reset" {
        it "discards the session and the staged value" {
            commit_and_skip(&mut app, "4");
            enter(&mut app, "9");

            assert_eq!(app.dispatch(Event::Reset).expect("Dispatch failed"), Outcome::Reset);
            assert_eq!(app.stats().turn_count, 0);
            assert_eq!(app.staged(), "0");
            assert!(app.history().is_empty());
        }
    }

    describe "reason catalog" {
        it "returns the catalog after adding" {
            let outcome = app.dispatch(Event::AddReason("Bad position".to_string())).expect("Failed to add");
            match outcome {
                Outcome::Reasons(labels) => {
                    assert_eq!(labels.len(), 6);
                    assert_eq!(labels[5], "Bad position");
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }

        it "ignores an out-of-range delete" {
            assert_eq!(app.dispatch(Event::DeleteReason(42)).expect("Dispatch failed"), Outcome::Ignored);
            assert_eq!(app.reasons().len(), 5);
        }

        it "can be edited while a reason is pending" {
            app.dispatch(Event::Commit).expect("Failed to commit");
            app.dispatch(Event::AddReason("Bad position".to_string())).expect("Failed to add");
            let outcome = app
                .dispatch(Event::SelectReason(ReasonChoice::Catalog(5)))
                .expect("Failed to select");

            assert_eq!(outcome, Outcome::TurnSettled(Turn::new(1, 0, Some("Bad position".to_string()))));
        }
    }

    describe "request detail" {
        it "projects rows and series for an archived session" {
            commit_and_skip(&mut app, "2");
            app.dispatch(Event::Commit).expect("Failed to commit");
            app.dispatch(Event::SelectReason(ReasonChoice::Catalog(4))).expect("Failed to select");
            commit_and_skip(&mut app, "8");
            app.dispatch(Event::EndSession).expect("Failed to end");

            match app.dispatch(Event::RequestDetail(0)).expect("Failed to request detail") {
                Outcome::Detail(projection) => {
                    assert_eq!(projection.series, vec![2, 2, 10]);
                    assert_eq!(projection.rows.len(), 4);
                    assert_eq!(projection.rows[2], DetailRow::Reason {
                        turn_index: 2,
                        text: "Kiss".to_string(),
                    });
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }

        it "surfaces an unknown index" {
            let result = app.dispatch(Event::RequestDetail(0));
            assert!(matches!(result, Err(CaromError::NotFound { index: 0, len: 0 })));
        }
    }

    describe "statistics" {
        it "projects points needed for each stepped target" {
            commit_and_skip(&mut app, "4");

            let rows = app.projections();
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].cells.len(), 5);
            // 0.90 over 2 turns needs 2 points; 4 already scored
            assert_eq!(rows[0].cells[0].needed_score, 0);
        }

        it "computes overall figures from the archive" {
            commit_and_skip(&mut app, "2");
            app.dispatch(Event::EndSession).expect("Failed to end");
            commit_and_skip(&mut app, "1");
            app.dispatch(Event::EndSession).expect("Failed to end");

            let overall = app.overall();
            assert_eq!(overall.sessions, 2);
            assert_eq!(overall.moyenne, 1.5);
            assert_eq!(overall.score_target, 37);
            // fewer than 20 archived sessions
            assert!(overall.next_game.iter().all(|(_, m)| m.is_none()));
        }

        it "averages only the configured window of recent sessions" {
            let config = Config { history_window: 2, ..Config::default() };
            let mut app = App::open(db.clone(), config).expect("Failed to open app");
            for keys in ["9", "1", "3"] {
                commit_and_skip(&mut app, keys);
                app.dispatch(Event::EndSession).expect("Failed to end");
            }

            let overall = app.overall();
            assert_eq!(overall.sessions, 3);
            assert_eq!(overall.moyenne, 2.0);
            assert_eq!(overall.score_target, 50);
            // window of 2 at target 0.90: 1.80 minus the kept 3.00
            assert_eq!(overall.next_game[0], (0.9, Some(0.0)));
        }
    }
}
