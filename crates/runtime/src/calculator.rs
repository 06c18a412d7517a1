//! Caller-facing attack calculator.
//!
//! [`Calculator`] owns a shared catalog and a rules configuration and runs
//! [`AttackEngine`] with fresh OS randomness per call. Tests and replays pass
//! their own [`RandomSource`] through [`Calculator::calculate_with`].

use std::sync::Arc;

use rules_content::{BuiltinCatalog, ConfigLoader, ContentFactory};
use rules_core::stats::{
    cyber_attribute_sources, cyber_civil_sources, tag_attribute_sources, tag_civil_sources,
};
use rules_core::{
    AttackEngine, Attribute, Attributes, BonusSource, CalculationRequest, CalculationResult,
    CivilStat, CyberModsState, RandomSource, RuleCatalog, RulesConfig, SerializedCyberMods,
    StatTotals, StatusContext, TagSelections, WeaponConfig, sum_sources,
};
use tracing::{debug, info_span, trace, warn};

use crate::config::CalculatorConfig;
use crate::error::{Result, RuntimeError};
use crate::random::ThreadRandom;

/// Labelled bonus sources plus their sum.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBreakdown<K: Ord> {
    pub sources: Vec<BonusSource<K>>,
    pub totals: StatTotals<K>,
}

impl<K: Ord + Copy> StatBreakdown<K> {
    fn from_sources(sources: Vec<BonusSource<K>>) -> Self {
        let totals = sum_sources(&sources);
        Self { sources, totals }
    }
}

/// Attack calculator over a shared rule catalog.
#[derive(Clone, Debug)]
pub struct Calculator {
    catalog: Arc<RuleCatalog>,
    rules: RulesConfig,
}

impl Calculator {
    pub fn new(catalog: impl Into<Arc<RuleCatalog>>, rules: RulesConfig) -> Self {
        Self {
            catalog: catalog.into(),
            rules,
        }
    }

    /// Calculator over the embedded catalog and constants.
    pub fn builtin() -> Result<Self> {
        let catalog = BuiltinCatalog::load().map_err(RuntimeError::Content)?;
        let rules = BuiltinCatalog::config().map_err(RuntimeError::Content)?;
        Ok(Self::new(catalog, rules))
    }

    /// Builds a calculator from configured paths, falling back to the
    /// embedded catalog and constants for anything unset.
    pub fn from_config(config: &CalculatorConfig) -> Result<Self> {
        let (catalog, dir_rules) = match &config.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                let catalog = factory.load_catalog().map_err(RuntimeError::Content)?;
                let rules = factory.load_config().map_err(RuntimeError::Content)?;
                (catalog, rules)
            }
            None => {
                let catalog = BuiltinCatalog::load().map_err(RuntimeError::Content)?;
                let rules = BuiltinCatalog::config().map_err(RuntimeError::Content)?;
                (catalog, rules)
            }
        };

        let rules = match &config.rules_path {
            Some(path) => ConfigLoader::load(path).map_err(RuntimeError::Content)?,
            None => dir_rules,
        };

        debug!(
            systems = catalog.cyber().len(),
            tags = catalog.tags().count(),
            data_dir = ?config.data_dir,
            "rule content loaded"
        );
        Ok(Self::new(catalog, rules))
    }

    /// Builds a calculator from `CONTENT_DATA_DIR` and `RULES_CONFIG`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&CalculatorConfig::from_env())
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Empty installation with every catalog slot set to "None".
    pub fn empty_installation(&self) -> CyberModsState {
        CyberModsState::from_catalog(self.catalog.as_ref())
    }

    /// Runs one calculation with OS randomness.
    pub fn calculate(&self, request: &CalculationRequest<'_>) -> Result<CalculationResult> {
        self.calculate_with(request, &mut ThreadRandom::new())
    }

    /// Runs one calculation drawing from `rng`.
    pub fn calculate_with<R: RandomSource + ?Sized>(
        &self,
        request: &CalculationRequest<'_>,
        rng: &mut R,
    ) -> Result<CalculationResult> {
        let span = info_span!("calculate", weapon = %request.weapon.kind);
        let _guard = span.enter();

        let engine = AttackEngine::new(self.catalog.as_ref(), &self.rules);
        match engine.calculate(request, rng) {
            Ok(result) => {
                debug!(
                    category = %result.kind.category,
                    subtype = %result.kind.subtype,
                    "weapon classified"
                );
                for skipped in &result.skipped {
                    trace!(
                        system = %skipped.system,
                        ident = %skipped.ident,
                        reason = %skipped.reason,
                        "installed entry not in catalog"
                    );
                }
                debug!(attributes = %result.effective_attributes, "effective attributes");
                debug!(
                    outcome = ?result.outcome,
                    damage = result.damage,
                    hit_chance = result.hit_chance,
                    crit_chance = result.crit_chance,
                    procs = result.procs.len(),
                    "attack resolved"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "attack calculation failed");
                Err(err.into())
            }
        }
    }

    /// Runs one calculation and returns the human-readable trace.
    pub fn compute_damage(
        &self,
        attributes: &Attributes,
        tags: &TagSelections,
        cyber_mods: &SerializedCyberMods,
        weapon: &WeaponConfig,
        status: StatusContext,
    ) -> Result<String> {
        let request =
            CalculationRequest::new(attributes, tags, cyber_mods, weapon).with_status(status);
        self.calculate(&request).map(|result| result.trace)
    }

    /// Attribute bonuses by source: active tags first, then installed mods.
    pub fn attribute_breakdown(
        &self,
        tags: &TagSelections,
        mods: &CyberModsState,
    ) -> StatBreakdown<Attribute> {
        let mut sources = tag_attribute_sources(tags, self.catalog.as_ref());
        sources.extend(cyber_attribute_sources(mods, self.catalog.as_ref()));
        StatBreakdown::from_sources(sources)
    }

    /// Civil stat bonuses by source: active tags first, then installed mods.
    pub fn civil_breakdown(
        &self,
        tags: &TagSelections,
        mods: &CyberModsState,
    ) -> StatBreakdown<CivilStat> {
        let mut sources = tag_civil_sources(tags, self.catalog.as_ref());
        sources.extend(cyber_civil_sources(mods, self.catalog.as_ref()));
        StatBreakdown::from_sources(sources)
    }
}
