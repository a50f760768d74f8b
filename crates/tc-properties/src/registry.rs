//! Registry: every property model for every compound, built once from a
//! coefficient database.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tc_core::{ChemicalId, MethodId, ensure_positive};
use tc_correlations::{CorrelationError, CorrelationModel, EquationKind, Evaluator, ExtrapolationPolicy, ValidRange};
use tracing::{info, warn};

use crate::catalog::MethodCatalog;
use crate::conditions::Conditions;
use crate::config::EngineConfig;
use crate::error::{PropertyError, PropertyResult, ValidationError};
use crate::kind::PropertyKind;
use crate::property::{Candidate, Evaluation, PropertyModel};
use crate::record::{CompoundRecord, CorrelationRecord, Database};
use crate::sweeps::{SweepDefinition, SweepResult, sweep_property};

/// Metadata known about a compound.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundInfo {
    pub id: ChemicalId,
    pub name: Option<String>,
    /// kg/mol
    pub molar_mass: Option<f64>,
}

/// Which section of the database a skipped record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSection {
    Compounds,
    Correlations,
}

/// A record left out of the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub section: RecordSection,
    /// Position within its section.
    pub index: usize,
    pub error: ValidationError,
}

/// Outcome of [`Registry::bootstrap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub compounds_loaded: usize,
    pub correlations_loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, section: RecordSection, index: usize, error: ValidationError) {
        warn!(?section, index, %error, "skipping record");
        self.skipped.push(SkippedRecord {
            section,
            index,
            error,
        });
    }
}

type PropertyKey = (ChemicalId, PropertyKind);

/// Immutable set of property models plus per-property method pins.
#[derive(Debug)]
pub struct Registry {
    config: EngineConfig,
    evaluator: Arc<dyn Evaluator>,
    compounds: BTreeMap<ChemicalId, CompoundInfo>,
    properties: BTreeMap<PropertyKey, PropertyModel>,
}

impl Registry {
    /// Build a registry with the standard method catalog.
    ///
    /// Invalid records are skipped and listed in the report; the rest load.
    /// Fails only if `config` itself is invalid.
    pub fn bootstrap(database: Database, config: EngineConfig) -> PropertyResult<(Self, LoadReport)> {
        Self::bootstrap_with_catalog(database, config, &MethodCatalog::standard())
    }

    pub fn bootstrap_with_catalog(
        database: Database,
        config: EngineConfig,
        catalog: &MethodCatalog,
    ) -> PropertyResult<(Self, LoadReport)> {
        config.validate()?;
        let mut report = LoadReport::default();

        let mut compounds = load_compounds(&database.compounds, &mut report);
        let groups = load_correlations(&database.correlations, &config, catalog, &mut report);

        let mut properties = BTreeMap::new();
        for ((compound, kind), members) in groups {
            let indices: Vec<usize> = members.iter().map(|(i, _)| *i).collect();
            let candidates = members.into_iter().map(|(_, c)| c).collect();
            match PropertyModel::new(compound.clone(), kind, candidates) {
                Ok(model) => {
                    report.correlations_loaded += indices.len();
                    compounds.entry(compound.clone()).or_insert_with(|| CompoundInfo {
                        id: compound.clone(),
                        name: None,
                        molar_mass: None,
                    });
                    properties.insert((compound, kind), model);
                }
                Err(error) => {
                    for index in indices {
                        report.skip(RecordSection::Correlations, index, error.clone());
                    }
                }
            }
        }

        report.skipped.sort_by_key(|s| (s.section == RecordSection::Correlations, s.index));
        info!(
            compounds = compounds.len(),
            properties = properties.len(),
            correlations = report.correlations_loaded,
            skipped = report.skipped.len(),
            evaluator = ?config.evaluator,
            "registry bootstrapped"
        );

        let evaluator = config.build_evaluator();
        Ok((
            Self {
                config,
                evaluator,
                compounds,
                properties,
            },
            report,
        ))
    }

    /// Load a database file and bootstrap from it.
    pub fn load(path: &Path, config: EngineConfig) -> PropertyResult<(Self, LoadReport)> {
        Self::bootstrap(Database::load(path)?, config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Backend used for bulk queries.
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    pub fn compound(&self, id: &ChemicalId) -> Option<&CompoundInfo> {
        self.compounds.get(id)
    }

    pub fn compounds(&self) -> impl Iterator<Item = &CompoundInfo> + '_ {
        self.compounds.values()
    }

    /// kg/mol, if the database declared one.
    pub fn molar_mass(&self, id: &ChemicalId) -> Option<f64> {
        self.compounds.get(id).and_then(|c| c.molar_mass)
    }

    /// Property kinds with at least one correlation for `compound`.
    pub fn properties_of(&self, compound: &ChemicalId) -> Vec<PropertyKind> {
        self.properties
            .keys()
            .filter(|(id, _)| id == compound)
            .map(|(_, kind)| *kind)
            .collect()
    }

    pub fn property(&self, compound: &ChemicalId, kind: PropertyKind) -> PropertyResult<&PropertyModel> {
        self.ensure_compound(compound)?;
        self.properties
            .get(&(compound.clone(), kind))
            .ok_or_else(|| PropertyError::UnknownProperty {
                compound: compound.clone(),
                property: kind,
            })
    }

    fn property_mut(&mut self, compound: &ChemicalId, kind: PropertyKind) -> PropertyResult<&mut PropertyModel> {
        self.ensure_compound(compound)?;
        self.properties
            .get_mut(&(compound.clone(), kind))
            .ok_or_else(|| PropertyError::UnknownProperty {
                compound: compound.clone(),
                property: kind,
            })
    }

    /// Property value at temperature `x` [K].
    ///
    /// For properties on the pressure axis the value is a function of
    /// `pressure` [Pa], which is then required.
    pub fn get_property(
        &self,
        compound: &ChemicalId,
        kind: PropertyKind,
        x: f64,
        pressure: Option<f64>,
    ) -> PropertyResult<f64> {
        let conditions = Conditions {
            temperature: x,
            pressure,
        };
        self.evaluate_property(compound, kind, &conditions).map(|e| e.value)
    }

    /// Like [`Registry::get_property`], reporting the method used.
    pub fn evaluate_property(
        &self,
        compound: &ChemicalId,
        kind: PropertyKind,
        conditions: &Conditions,
    ) -> PropertyResult<Evaluation> {
        let model = self.property(compound, kind)?;
        model.evaluate(conditions.variable_for(kind)?)
    }

    /// Values at many points of the property's axis, on the configured backend.
    pub fn get_property_many(
        &self,
        compound: &ChemicalId,
        kind: PropertyKind,
        xs: &[f64],
    ) -> PropertyResult<Vec<PropertyResult<f64>>> {
        let model = self.property(compound, kind)?;
        Ok(model.values_at(xs, self.evaluator()))
    }

    /// Tabulate a property across a sweep of its axis.
    pub fn sweep(
        &self,
        compound: &ChemicalId,
        kind: PropertyKind,
        sweep: &SweepDefinition,
    ) -> PropertyResult<SweepResult> {
        let model = self.property(compound, kind)?;
        Ok(sweep_property(model, sweep, self.evaluator())?)
    }

    /// Pin `method` for (compound, kind) until cleared.
    pub fn set_method(&mut self, compound: &ChemicalId, kind: PropertyKind, method: &str) -> PropertyResult<()> {
        self.property_mut(compound, kind)?.pin(method)
    }

    /// Return (compound, kind) to automatic selection.
    pub fn clear_method(&mut self, compound: &ChemicalId, kind: PropertyKind) -> PropertyResult<()> {
        self.property_mut(compound, kind)?.unpin();
        Ok(())
    }

    /// Methods for (compound, kind) in selection order.
    pub fn available_methods(&self, compound: &ChemicalId, kind: PropertyKind) -> PropertyResult<Vec<MethodId>> {
        Ok(self.property(compound, kind)?.methods().cloned().collect())
    }

    fn ensure_compound(&self, compound: &ChemicalId) -> PropertyResult<()> {
        if self.compounds.contains_key(compound) {
            Ok(())
        } else {
            Err(PropertyError::UnknownCompound {
                compound: compound.clone(),
            })
        }
    }
}

fn load_compounds(records: &[CompoundRecord], report: &mut LoadReport) -> BTreeMap<ChemicalId, CompoundInfo> {
    let mut parsed: Vec<(usize, CompoundInfo)> = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match compound_info(record) {
            Ok(info) => parsed.push((index, info)),
            Err(error) => report.skip(RecordSection::Compounds, index, error),
        }
    }

    // A repeated id is ambiguous whichever record comes first, so all copies go.
    let mut counts: BTreeMap<ChemicalId, usize> = BTreeMap::new();
    for (_, info) in &parsed {
        *counts.entry(info.id.clone()).or_default() += 1;
    }

    let mut compounds = BTreeMap::new();
    for (index, info) in parsed {
        if counts.get(&info.id).copied().unwrap_or(0) > 1 {
            report.skip(
                RecordSection::Compounds,
                index,
                ValidationError::DuplicateCompound { compound: info.id },
            );
        } else {
            report.compounds_loaded += 1;
            compounds.insert(info.id.clone(), info);
        }
    }
    compounds
}

fn compound_info(record: &CompoundRecord) -> Result<CompoundInfo, ValidationError> {
    let id = ChemicalId::new(&record.id).map_err(|source| ValidationError::InvalidIdentifier {
        field: "compound id",
        source,
    })?;
    if let Some(value) = record.molar_mass
        && ensure_positive(value, "molar mass").is_err()
    {
        return Err(ValidationError::InvalidMolarMass { compound: id, value });
    }
    Ok(CompoundInfo {
        id,
        name: record.name.clone(),
        molar_mass: record.molar_mass,
    })
}

/// Valid candidates grouped by (compound, property), each tagged with its record index.
fn load_correlations(
    records: &[CorrelationRecord],
    config: &EngineConfig,
    catalog: &MethodCatalog,
    report: &mut LoadReport,
) -> BTreeMap<PropertyKey, Vec<(usize, Candidate)>> {
    let mut groups: BTreeMap<PropertyKey, Vec<(usize, Candidate)>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        match candidate(record, config, catalog) {
            Ok((compound, property, candidate)) => groups
                .entry((compound, property))
                .or_default()
                .push((index, candidate)),
            Err(error) => report.skip(RecordSection::Correlations, index, error),
        }
    }

    for ((compound, kind), members) in groups.iter_mut() {
        let mut counts: BTreeMap<MethodId, usize> = BTreeMap::new();
        for (_, c) in members.iter() {
            *counts.entry(c.method().clone()).or_default() += 1;
        }
        members.retain(|(index, c)| {
            let unique = counts.get(c.method()).copied().unwrap_or(0) == 1;
            if !unique {
                report.skip(
                    RecordSection::Correlations,
                    *index,
                    ValidationError::DuplicateMethod {
                        compound: compound.clone(),
                        property: *kind,
                        method: c.method().clone(),
                    },
                );
            }
            unique
        });
    }
    groups.retain(|_, members| !members.is_empty());
    groups
}

fn candidate(
    record: &CorrelationRecord,
    config: &EngineConfig,
    catalog: &MethodCatalog,
) -> Result<(ChemicalId, PropertyKind, Candidate), ValidationError> {
    let compound = ChemicalId::new(&record.compound).map_err(|source| ValidationError::InvalidIdentifier {
        field: "compound id",
        source,
    })?;
    let method = MethodId::new(&record.method).map_err(|source| ValidationError::InvalidIdentifier {
        field: "method id",
        source,
    })?;
    let Some(property) = PropertyKind::from_name(&record.property) else {
        return Err(ValidationError::UnknownProperty {
            compound,
            method,
            property: record.property.clone(),
        });
    };
    let Some(equation) = EquationKind::from_name(&record.equation) else {
        return Err(ValidationError::UnknownEquation {
            compound,
            property,
            method,
            equation: record.equation.clone(),
        });
    };
    let policy = match record.extrapolation.as_deref() {
        None => config.default_extrapolation,
        Some(name) => match ExtrapolationPolicy::from_name(name) {
            Some(policy) => policy,
            None => {
                return Err(ValidationError::UnknownExtrapolation {
                    compound,
                    property,
                    method,
                    policy: name.to_string(),
                });
            }
        },
    };

    if !catalog.allows(property, equation) {
        return Err(ValidationError::EquationNotAllowed {
            compound,
            property,
            method,
            equation,
        });
    }

    let invalid = |source: CorrelationError| ValidationError::Correlation {
        compound: compound.clone(),
        property,
        method: method.clone(),
        source,
    };

    let range = match (record.valid_range, equation) {
        (Some([min, max]), _) => ValidRange::new(property.axis(), min, max).map_err(invalid)?,
        (None, EquationKind::Constant) => ValidRange::unbounded(property.axis()),
        (None, equation) => {
            return Err(ValidationError::MissingRange {
                compound: compound.clone(),
                property,
                method: method.clone(),
                equation,
            });
        }
    };

    let mut model = CorrelationModel::from_coefficients(equation, &record.coefficients, range).map_err(invalid)?;
    if let Some(source) = &record.source {
        model = model.with_source(source.clone());
    }

    Ok((compound, property, Candidate::new(method, record.priority, model, policy)))
}
