//! Recursive tag tree translator
//!
//! Each node is handled by the first matching rule:
//!
//! 1. leaf: whitespace-guarded oracle call
//! 2. untranslatable container: copied unchanged, children untouched
//! 3. container of depth 2: one injection attempt
//! 4. anything else, or a rejected injection: translate every child on its
//!    own and reassemble in the original order
//!
//! Oracle failures abort the whole tree; no partial result is returned.

use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::debug;

use crate::core::config::EngineConfig;
use crate::core::errors::Result;
use crate::core::injection::{InjectionCandidate, InjectionOutcome, InjectionPlanner};
use crate::core::models::{Strategy, TranslationStats};
use crate::core::oracle::TranslationOracle;
use crate::core::stats::StatsTracker;
use crate::core::tag::{Container, Node};
use crate::core::whitespace::translate_to_string;

/// Structure-preserving translator over a flat-text oracle
#[derive(Clone)]
pub struct TagTranslator {
    oracle: Arc<dyn TranslationOracle>,
    config: Arc<EngineConfig>,
    planner: InjectionPlanner,
    stats: StatsTracker,
}

impl TagTranslator {
    /// Create a translator
    pub fn new(oracle: Arc<dyn TranslationOracle>, config: EngineConfig) -> Self {
        let planner = InjectionPlanner::new(config.max_sequence_length, config.depth_mode);
        Self {
            oracle,
            config: Arc::new(config),
            planner,
            stats: StatsTracker::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Counters accumulated since creation or the last reset
    pub async fn stats(&self) -> TranslationStats {
        self.stats.get_stats().await
    }

    pub async fn reset_stats(&self) {
        self.stats.reset().await;
    }

    /// Translate a tree
    pub async fn translate(&self, node: Node) -> Result<Node> {
        self.translate_node(node).await
    }

    /// Translate a flat string through the whitespace guard
    pub async fn translate_text(&self, text: &str) -> Result<String> {
        self.stats.record_oracle_call().await;
        translate_to_string(self.oracle.as_ref(), text).await
    }

    fn translate_node(&self, node: Node) -> BoxFuture<'_, Result<Node>> {
        async move {
            let container = match node {
                Node::Leaf(text) => {
                    let translated = self.translate_text(&text).await?;
                    self.stats.record(Strategy::Leaf).await;
                    return Ok(Node::Leaf(translated));
                }
                Node::Container(container) => container,
            };

            if !container.translatable {
                self.stats.record(Strategy::Frozen).await;
                return Ok(Node::Container(container));
            }

            if container.depth(self.config.depth_mode) == 2 {
                match self.try_inject(&container).await? {
                    InjectionOutcome::Injected(injected) => {
                        self.stats.record(Strategy::Injection).await;
                        return Ok(Node::Container(injected));
                    }
                    InjectionOutcome::Inapplicable(reason) => {
                        debug!("Injection rejected, translating children: {}", reason);
                        self.stats.record_fallback().await;
                    }
                }
            }

            let translated = self.translate_children(container).await?;
            self.stats.record(Strategy::PerChild).await;
            Ok(Node::Container(translated))
        }
        .boxed()
    }

    /// One injection attempt for a depth-2 container
    async fn try_inject(&self, parent: &Container) -> Result<InjectionOutcome> {
        let positions = match self.planner.check(parent) {
            Ok(positions) => positions,
            Err(reason) => return Ok(InjectionOutcome::Inapplicable(reason)),
        };

        let translated_parent = self.translate_text(&parent.text()).await?;

        let mut candidates = Vec::with_capacity(positions.len());
        for position in positions {
            let child = &parent.children[position];
            let translated = self.translate_text(&child.text()).await?;
            candidates.push(InjectionCandidate::new(translated, child.clone()));
        }

        Ok(self.planner.plan(parent, &translated_parent, candidates))
    }

    async fn translate_children(&self, container: Container) -> Result<Container> {
        let Container {
            children,
            translatable,
        } = container;

        let children = if self.config.concurrent_siblings {
            try_join_all(children.into_iter().map(|child| self.translate_node(child))).await?
        } else {
            let mut translated = Vec::with_capacity(children.len());
            for child in children {
                translated.push(self.translate_node(child).await?);
            }
            translated
        };

        Ok(Container::new(children, translatable))
    }
}
