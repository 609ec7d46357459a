// Rust guideline compliant 2026-02-09

//! Shared fixtures for marketplace integration tests.

#![allow(dead_code)]

use sharenet_app::{Marketplace, NewItem, NewPost, QuestionInput};
use sharenet_core::{
    Config, Item, ItemMode, LostFoundPost, ManualClock, Notification, Notifier, PostType, Store,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const START: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

/// Notifier that keeps every notification in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn kinds_for(&self, user: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user == user)
            .map(|n| n.kind.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> sharenet_core::Result<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Notifier whose deliveries always fail.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _notification: &Notification) -> sharenet_core::Result<()> {
        Err(sharenet_core::Error::Conflict("sink offline".to_string()))
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub market: Marketplace,
    pub clock: Arc<ManualClock>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(dir.path()).expect("Failed to open store");
        let clock = Arc::new(ManualClock::new(START));
        let notifier = Arc::new(RecordingNotifier::default());
        let market = Marketplace::new(store, config)
            .with_clock(clock.clone())
            .with_notifier(notifier.clone());
        Self {
            dir,
            market,
            clock,
            notifier,
        }
    }

    pub fn rent_item(&self, owner: &str, price: f64) -> Item {
        self.market
            .create_item(
                owner,
                NewItem {
                    title: "Graphing calculator".to_string(),
                    description: "TI-84".to_string(),
                    mode: ItemMode::Rent,
                    price: Some(price),
                    instant_claim: false,
                    max_claimers: 1,
                },
            )
            .expect("Failed to create rent item")
    }

    pub fn give_item(&self, owner: &str, max_claimers: u32) -> Item {
        self.market
            .create_item(
                owner,
                NewItem {
                    title: "Moving-out boxes".to_string(),
                    description: String::new(),
                    mode: ItemMode::Give,
                    price: None,
                    instant_claim: true,
                    max_claimers,
                },
            )
            .expect("Failed to create give item")
    }

    pub fn found_post(&self, owner: &str) -> LostFoundPost {
        self.market
            .create_post(
                owner,
                NewPost {
                    post_type: PostType::Found,
                    title: "Black backpack".to_string(),
                    description: "Found in the library".to_string(),
                    location: "Library 2F".to_string(),
                    questions: vec![
                        QuestionInput {
                            question: "What brand is it?".to_string(),
                            answer: "Jansport".to_string(),
                        },
                        QuestionInput {
                            question: "What is on the keychain?".to_string(),
                            answer: "A rubber duck".to_string(),
                        },
                    ],
                },
            )
            .expect("Failed to create post")
    }
}
