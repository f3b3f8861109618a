use std::sync::Arc;

use refuel_core::numeric::GRID_EPSILON;
use refuel_core::{
    CurveColumnRegistry, NoopObserver, RebucketObserver, UnitConverter, ViewPipeline,
    competitive_ranges, merge_rows_by_priority, round_dp,
};
use refuel_types::{
    BandSet, CarrierFocus, Comparison, ComparisonContext, ConversionFactor, CurveKey,
    RefuelConfig, RefuelError, SurchargeRow, UnitScope, UnitTable, View,
};

/// Upper bound accepted for `decimals`.
const MAX_DECIMALS: u32 = 6;

/// Orchestrator that turns raw band sets into display-ready comparisons.
#[derive(Clone)]
pub struct Refuel {
    pub(crate) cfg: RefuelConfig,
    pub(crate) pipeline: ViewPipeline,
    pub(crate) observer: Arc<dyn RebucketObserver>,
}

impl std::fmt::Debug for Refuel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refuel")
            .field("cfg", &self.cfg)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Refuel` orchestrator with custom configuration.
pub struct RefuelBuilder {
    cfg: RefuelConfig,
    observer: Arc<dyn RebucketObserver>,
}

impl Default for RefuelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RefuelBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults: tie tolerance `1e-4`, two decimals, overlap threshold of two
    /// curves, an empty unit table and no telemetry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: RefuelConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the whole configuration.
    ///
    /// Setters called afterwards still apply on top of it.
    #[must_use]
    pub fn config(mut self, cfg: RefuelConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Coverage difference under which two source bands count as tied.
    ///
    /// Behavior and trade-offs:
    /// - Too small and floating-point noise decides ties instead of the
    ///   contains-start and larger-lower-bound rules.
    /// - Too large and bands with genuinely different coverage are treated as
    ///   equal.
    #[must_use]
    pub const fn tie_tolerance(mut self, tolerance: f64) -> Self {
        self.cfg.tie_tolerance = tolerance;
        self
    }

    /// Fixed precision for grid boundaries and converted values.
    #[must_use]
    pub const fn decimals(mut self, decimals: u32) -> Self {
        self.cfg.decimals = decimals;
        self
    }

    /// Minimum number of present curves an interval needs to survive the
    /// overlap filter.
    #[must_use]
    pub const fn min_overlap_curves(mut self, n: usize) -> Self {
        self.cfg.min_overlap_curves = n;
        self
    }

    /// Register (or replace) the display-unit conversion for one scope.
    #[must_use]
    pub fn unit_factor(mut self, scope: UnitScope, factor: ConversionFactor) -> Self {
        self.cfg.units.insert(scope, factor);
        self
    }

    /// Replace the unit table.
    #[must_use]
    pub fn units(mut self, units: UnitTable) -> Self {
        self.cfg.units = units;
        self
    }

    /// Attach a telemetry observer, shared by every view and conversion.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn RebucketObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build the `Refuel` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the tie tolerance is negative or not finite, if
    /// `decimals` exceeds 6 or is too coarse for the step width of a built-in
    /// view, or if the overlap threshold is zero.
    pub fn build(self) -> Result<Refuel, RefuelError> {
        let cfg = self.cfg;
        if !(cfg.tie_tolerance.is_finite() && cfg.tie_tolerance >= 0.0) {
            return Err(RefuelError::InvalidArg(format!(
                "tie_tolerance must be finite and >= 0, got {}",
                cfg.tie_tolerance
            )));
        }
        if cfg.decimals > MAX_DECIMALS {
            return Err(RefuelError::InvalidArg(format!(
                "decimals must be <= {MAX_DECIMALS}, got {}",
                cfg.decimals
            )));
        }
        if let Some((view, step)) = View::ALL
            .into_iter()
            .filter_map(|v| v.step_width().map(|step| (v, step)))
            .find(|&(_, step)| (round_dp(step, cfg.decimals) - step).abs() > GRID_EPSILON)
        {
            return Err(RefuelError::InvalidArg(format!(
                "decimals = {} cannot express the {step} grid of view {view}",
                cfg.decimals
            )));
        }
        if cfg.min_overlap_curves == 0 {
            return Err(RefuelError::InvalidArg(
                "min_overlap_curves must be at least 1".to_string(),
            ));
        }

        let pipeline = ViewPipeline::from_config(&cfg).with_observer(Arc::clone(&self.observer));
        Ok(Refuel {
            cfg,
            pipeline,
            observer: self.observer,
        })
    }
}

impl Refuel {
    /// Start building a new `Refuel` instance.
    ///
    /// ```rust,ignore
    /// use refuel::{ConversionFactor, Refuel, UnitScope};
    ///
    /// let refuel = Refuel::builder()
    ///     .unit_factor(
    ///         UnitScope::new("DE", "DHL", "ground_domestic"),
    ///         ConversionFactor::usd_per_gallon_to_eur_per_liter(),
    ///     )
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RefuelBuilder {
        RefuelBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RefuelConfig {
        &self.cfg
    }

    /// View pipeline configured from this instance.
    #[must_use]
    pub const fn pipeline(&self) -> &ViewPipeline {
        &self.pipeline
    }

    /// Apply `view` to `bands`, then convert curves to their display units.
    ///
    /// Conversion factors are looked up per curve in the unit table for the
    /// market and category of `ctx`; curves without an entry are left as they
    /// are. Conversion always runs after the view. When any conversion applied,
    /// the output is re-sorted by interval.
    ///
    /// # Errors
    /// Returns `InvalidBand` if the input contains a malformed interval, and
    /// `InvalidStep` if the configured precision is too coarse for the view.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "refuel::compare",
            skip(self, bands),
            fields(view = %view, market = %ctx.market, category = %ctx.category),
        )
    )]
    pub fn compare(
        &self,
        bands: &BandSet,
        view: View,
        ctx: &ComparisonContext,
    ) -> Result<Comparison, RefuelError> {
        bands.validate()?;
        let viewed = self.pipeline.apply(view, bands)?;
        let bands = self.convert_units(viewed, ctx);
        let curves = CurveColumnRegistry::from_bands(&bands).into_keys();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "refuel::compare",
            rows = bands.len(),
            curves = curves.len(),
            "comparison ready"
        );
        Ok(Comparison {
            view,
            total_rows: bands.len(),
            bands,
            curves,
        })
    }

    /// Merge row series in priority order (measured first), then [`Refuel::compare`].
    ///
    /// # Errors
    /// See [`Refuel::compare`].
    pub fn compare_rows<I, S>(
        &self,
        series: I,
        view: View,
        ctx: &ComparisonContext,
    ) -> Result<Comparison, RefuelError>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = SurchargeRow>,
    {
        self.compare(&merge_rows_by_priority(series), view, ctx)
    }

    /// Price ranges where `curve` is the cheapest, computed on the
    /// `complete@0.01` view after unit conversion.
    ///
    /// # Errors
    /// See [`Refuel::compare`].
    pub fn carrier_focus(
        &self,
        bands: &BandSet,
        curve: &CurveKey,
        ctx: &ComparisonContext,
    ) -> Result<CarrierFocus, RefuelError> {
        let complete = self.compare(bands, View::Complete, ctx)?;
        let competitive = competitive_ranges(&complete.bands, curve);
        Ok(CarrierFocus {
            curve: curve.clone(),
            total_competitive: competitive.len(),
            competitive,
        })
    }

    /// Curves of `bands` grouped by the conversion factor configured for them.
    ///
    /// Identity factors and curves without an entry are left out. Groups keep
    /// the registry order of their first curve.
    #[must_use]
    pub fn conversion_groups(
        &self,
        bands: &BandSet,
        ctx: &ComparisonContext,
    ) -> Vec<(ConversionFactor, Vec<CurveKey>)> {
        let mut groups: Vec<(ConversionFactor, Vec<CurveKey>)> = Vec::new();
        for key in &CurveColumnRegistry::from_bands(bands) {
            let Some(factor) =
                self.cfg
                    .units
                    .factor_for(&ctx.market, key.carrier_name(), &ctx.category)
            else {
                continue;
            };
            if factor.is_identity() {
                continue;
            }
            match groups.iter_mut().find(|(f, _)| *f == factor) {
                Some((_, keys)) => keys.push(key.clone()),
                None => groups.push((factor, vec![key.clone()])),
            }
        }
        groups
    }

    fn convert_units(&self, bands: BandSet, ctx: &ComparisonContext) -> BandSet {
        let groups = self.conversion_groups(&bands, ctx);
        if groups.is_empty() {
            return bands;
        }
        let mut out = bands;
        for (factor, curves) in groups {
            out = UnitConverter::new(factor)
                .decimals(self.cfg.decimals)
                .convert_curves_observed(&out, &curves, self.observer.as_ref());
        }
        let mut sorted = out.into_bands();
        sorted.sort_by(|a, b| {
            a.lower
                .total_cmp(&b.lower)
                .then(a.upper.total_cmp(&b.upper))
        });
        BandSet::new(sorted)
    }
}
