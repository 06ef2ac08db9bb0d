//! Loadout construction.
//!
//! A [`LoadoutFactory`] turns a chassis (and, depending on the construction
//! mode, settings or an existing loadout) into a fully validated
//! [`Loadout`]. Construction is all-or-nothing: a call either returns a
//! loadout that satisfies every structural rule or fails, and no partially
//! built loadout is ever handed out.
//!
//! [`StandardLoadoutFactory`] holds nothing but a shared reference to the
//! immutable equipment catalog, so one instance can serve any number of
//! threads.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chassis::Chassis;
use crate::constants::TONNAGE_EPSILON;
use crate::equipment::{Equipment, EquipmentCatalog};
use crate::error::{Error, Result};
use crate::loadout::{Loadout, Violation};
use crate::location::Location;
use crate::settings::LoadoutSettings;

/// Number of "did you mean" suggestions attached to unknown-equipment errors.
const EQUIPMENT_SUGGESTIONS: usize = 3;

/// How a loadout should be constructed.
#[derive(Debug, Clone, Copy)]
pub enum Construction<'a> {
    /// No equipment, no armor.
    Empty,
    /// Equipment and armor chosen by the default-build policy.
    Default(&'a LoadoutSettings),
    /// The chassis' reference "as shipped" configuration.
    Stock,
    /// An independent copy of an existing loadout.
    Clone(&'a Loadout),
}

impl Construction<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Construction::Empty => "empty",
            Construction::Default(_) => "default",
            Construction::Stock => "stock",
            Construction::Clone(_) => "clone",
        }
    }
}

/// Produces validated loadouts.
pub trait LoadoutFactory {
    /// A loadout with every component present, nothing equipped and no armor.
    fn produce_empty(&self, chassis: &Arc<Chassis>) -> Loadout;

    /// A loadout built by the default-build policy in `settings`.
    fn produce_default(
        &self,
        chassis: &Arc<Chassis>,
        settings: &LoadoutSettings,
    ) -> Result<Loadout>;

    /// The chassis' stock loadout, reconstructed from reference data.
    fn produce_stock(&self, chassis: &Arc<Chassis>) -> Result<Loadout>;

    /// An independent copy of `loadout` sharing no mutable state with it.
    fn produce_clone(&self, loadout: &Loadout) -> Result<Loadout>;

    /// Dispatch on a [`Construction`] mode.
    ///
    /// For [`Construction::Clone`] the chassis of the source loadout is used
    /// and `chassis` is ignored.
    fn produce(&self, chassis: &Arc<Chassis>, construction: Construction<'_>) -> Result<Loadout> {
        match construction {
            Construction::Empty => Ok(self.produce_empty(chassis)),
            Construction::Default(settings) => self.produce_default(chassis, settings),
            Construction::Stock => self.produce_stock(chassis),
            Construction::Clone(source) => self.produce_clone(source),
        }
    }
}

/// The standard [`LoadoutFactory`], resolving equipment from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct StandardLoadoutFactory<'c> {
    catalog: &'c EquipmentCatalog,
}

impl<'c> StandardLoadoutFactory<'c> {
    pub fn new(catalog: &'c EquipmentCatalog) -> Self {
        Self { catalog }
    }

    fn resolve_stock_item(&self, chassis: &Chassis, id: &str) -> Result<Arc<Equipment>> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownEquipment {
                chassis: chassis.name().to_string(),
                id: id.to_string(),
                suggestions: self.catalog.fuzzy_matches(id, EQUIPMENT_SUGGESTIONS),
            })
    }

    fn apply_defaults(&self, loadout: &mut Loadout, settings: &LoadoutSettings) -> Result<()> {
        let chassis = Arc::clone(loadout.chassis());
        let does_not_fit = |violation: Violation| Error::DefaultsDoNotFit {
            chassis: chassis.name().to_string(),
            violation,
        };

        if let Some(engine) = settings.engine {
            if !chassis.accepts_engine_rating(engine.rating) {
                return Err(Error::EngineRatingOutOfRange {
                    chassis: chassis.name().to_string(),
                    rating: engine.rating,
                    min: chassis.engine_min(),
                    max: chassis.engine_max(),
                });
            }
            let item = self
                .catalog
                .find_engine(engine.engine_type, engine.rating)
                .cloned()
                .ok_or(Error::EngineUnavailable {
                    engine_type: engine.engine_type,
                    rating: engine.rating,
                })?;
            loadout
                .add_item(Location::CenterTorso, item)
                .map_err(does_not_fit)?;
        }

        if settings.heat_sinks > 0 {
            let heat_sink = self
                .catalog
                .get(&settings.heat_sink_id)
                .cloned()
                .ok_or_else(|| Error::EquipmentUnavailable {
                    id: settings.heat_sink_id.clone(),
                })?;
            if !heat_sink.is_heat_sink() {
                return Err(Error::NotAHeatSink {
                    id: heat_sink.id.clone(),
                    kind: heat_sink.kind,
                });
            }
            for _ in 0..settings.heat_sinks {
                place_anywhere(loadout, &heat_sink).map_err(does_not_fit)?;
            }
        }

        for location in Location::ALL {
            let max = chassis.component(location).max_armor();
            let points = max * u32::from(settings.armor_percent) / 100;
            loadout.set_armor(location, points).map_err(does_not_fit)?;
        }

        Ok(())
    }

    fn apply_stock(&self, loadout: &mut Loadout) -> Result<()> {
        let chassis = Arc::clone(loadout.chassis());
        let stock = chassis.stock().ok_or_else(|| Error::MissingStockData {
            chassis: chassis.name().to_string(),
        })?;
        let does_not_fit = |violation: Violation| Error::StockDoesNotFit {
            chassis: chassis.name().to_string(),
            violation,
        };

        // Resolve everything before touching the loadout so that unknown ids
        // are reported ahead of any fit problem they would cause.
        let mut resolved: Vec<(Location, Arc<Equipment>)> = Vec::new();
        for location in Location::ALL {
            for id in stock.items.get(&location).into_iter().flatten() {
                resolved.push((location, self.resolve_stock_item(&chassis, id)?));
            }
        }

        for (&location, &points) in &stock.armor {
            loadout.set_armor(location, points).map_err(does_not_fit)?;
        }
        for (location, item) in resolved {
            loadout.add_item(location, item).map_err(does_not_fit)?;
        }

        if let Some(expected) = stock.expected_tons {
            let actual = loadout.total_tons();
            if (actual - expected).abs() > TONNAGE_EPSILON {
                return Err(Error::StockTonnageMismatch {
                    chassis: chassis.name().to_string(),
                    expected,
                    actual,
                });
            }
        }

        if let Some(name) = &stock.name {
            loadout.set_name(name.clone());
        }
        Ok(())
    }
}

/// Mount `item` in the first location, in canonical order, that takes it.
fn place_anywhere(
    loadout: &mut Loadout,
    item: &Arc<Equipment>,
) -> std::result::Result<(), Violation> {
    let mut last = None;
    for location in Location::ALL {
        match loadout.add_item(location, Arc::clone(item)) {
            Ok(()) => return Ok(()),
            // Out of tonnage everywhere once out of tonnage anywhere.
            Err(violation @ Violation::TonnageOverflow { .. }) => return Err(violation),
            Err(violation) => last = Some(violation),
        }
    }
    Err(last.unwrap_or(Violation::SlotOverflow {
        location: Location::CenterTorso,
        required: item.slots,
        free: 0,
    }))
}

impl LoadoutFactory for StandardLoadoutFactory<'_> {
    fn produce_empty(&self, chassis: &Arc<Chassis>) -> Loadout {
        debug!(chassis = chassis.name(), "producing empty loadout");
        Loadout::empty(Arc::clone(chassis))
    }

    fn produce_default(
        &self,
        chassis: &Arc<Chassis>,
        settings: &LoadoutSettings,
    ) -> Result<Loadout> {
        settings.validate()?;
        let mut loadout = self.produce_empty(chassis);
        if let Err(err) = self.apply_defaults(&mut loadout, settings) {
            warn!(chassis = chassis.name(), error = %err, "default loadout rejected");
            return Err(err);
        }
        info!(
            chassis = chassis.name(),
            tons = loadout.total_tons(),
            "produced default loadout"
        );
        Ok(loadout)
    }

    fn produce_stock(&self, chassis: &Arc<Chassis>) -> Result<Loadout> {
        let mut loadout = self.produce_empty(chassis);
        if let Err(err) = self.apply_stock(&mut loadout) {
            warn!(chassis = chassis.name(), error = %err, "stock loadout rejected");
            return Err(err);
        }
        info!(
            chassis = chassis.name(),
            items = loadout.item_count(),
            tons = loadout.total_tons(),
            "produced stock loadout"
        );
        Ok(loadout)
    }

    fn produce_clone(&self, source: &Loadout) -> Result<Loadout> {
        let inconsistent = |context: &str, violation: Violation| Error::CloneInconsistent {
            message: format!("{context}: {violation}"),
        };

        let chassis = source.chassis();
        if source.components().len() != chassis.components().len() {
            return Err(Error::CloneInconsistent {
                message: format!(
                    "source has {} components, chassis {} defines {}",
                    source.components().len(),
                    chassis.name(),
                    chassis.components().len()
                ),
            });
        }

        // Rebuild every component from scratch. Equipment definitions are
        // shared immutable catalog data; everything else is copied.
        let mut copy = Loadout::empty(Arc::clone(chassis));
        copy.set_name(source.name());
        for component in source.components() {
            copy.set_armor(component.location(), component.armor())
                .map_err(|v| inconsistent("armor", v))?;
        }
        for component in source.components() {
            for item in component.items() {
                copy.add_item(component.location(), Arc::clone(item))
                    .map_err(|v| inconsistent("equipment", v))?;
            }
        }
        copy.validate().map_err(|v| inconsistent("validation", v))?;

        if copy != *source {
            return Err(Error::CloneInconsistent {
                message: "copy differs from source".to_string(),
            });
        }

        debug!(loadout = copy.name(), "cloned loadout");
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chassis::StockLoadout;
    use crate::equipment::{EngineType, EquipmentKind};
    use crate::error::ErrorKind;
    use crate::location::HardpointType;
    use crate::settings::EngineSettings;
    use crate::test_helpers::{ChassisBuilder, EquipmentBuilder};

    fn catalog() -> EquipmentCatalog {
        EquipmentCatalog::from_items([
            EquipmentBuilder::weapon("medium-laser", HardpointType::Energy)
                .tons(1.0)
                .heat(4.0)
                .build(),
            EquipmentBuilder::new("heatsink", EquipmentKind::HeatSink).build(),
            EquipmentBuilder::engine(EngineType::Std, 200).tons(10.5).build(),
        ])
        .expect("catalog builds")
    }

    fn chassis_with_stock(stock: StockLoadout) -> Arc<Chassis> {
        Arc::new(
            ChassisBuilder::new("TST-1", 50)
                .hardpoints(Location::LeftArm, &[HardpointType::Energy])
                .stock(stock)
                .build(),
        )
    }

    #[test]
    fn empty_loadout_has_no_equipment_or_armor() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let loadout = factory.produce_empty(&chassis);
        assert_eq!(loadout.item_count(), 0);
        assert_eq!(loadout.armor_total(), 0);
        assert_eq!(loadout.name(), "TST-1");
        assert_eq!(loadout.validate(), Ok(()));
    }

    #[test]
    fn default_applies_engine_heat_sinks_and_armor_percent() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let settings = LoadoutSettings {
            armor_percent: 50,
            engine: Some(EngineSettings {
                engine_type: EngineType::Std,
                rating: 200,
            }),
            heat_sinks: 2,
            ..LoadoutSettings::default()
        };

        let loadout = factory
            .produce_default(&chassis, &settings)
            .expect("defaults fit");
        assert_eq!(
            loadout.engine().map(|e| e.id.as_str()),
            Some("engine-std-200")
        );
        assert_eq!(loadout.heat_sink_count(), 8 + 2);
        for location in Location::ALL {
            let max = chassis.component(location).max_armor();
            assert_eq!(loadout.component(location).armor(), max / 2);
        }
        // The head has one free slot, so it takes the first heat sink.
        assert_eq!(loadout.component(Location::Head).items().len(), 1);
    }

    #[test]
    fn default_rejects_engine_outside_chassis_range() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let settings = LoadoutSettings {
            engine: Some(EngineSettings {
                engine_type: EngineType::Std,
                rating: 400,
            }),
            ..LoadoutSettings::default()
        };
        let err = factory
            .produce_default(&chassis, &settings)
            .expect_err("rating too high");
        assert!(matches!(err, Error::EngineRatingOutOfRange { rating: 400, .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn default_rejects_engine_missing_from_catalog() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let settings = LoadoutSettings {
            engine: Some(EngineSettings {
                engine_type: EngineType::Xl,
                rating: 200,
            }),
            ..LoadoutSettings::default()
        };
        let err = factory
            .produce_default(&chassis, &settings)
            .expect_err("no xl engine");
        assert!(matches!(err, Error::EngineUnavailable { .. }));
    }

    #[test]
    fn default_rejects_heat_sinks_beyond_capacity() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let settings = LoadoutSettings {
            armor_percent: 0,
            heat_sinks: 46,
            ..LoadoutSettings::default()
        };
        let err = factory
            .produce_default(&chassis, &settings)
            .expect_err("too heavy");
        match err {
            Error::DefaultsDoNotFit { violation, .. } => {
                assert!(matches!(violation, Violation::TonnageOverflow { .. }))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn stock_unknown_item_fails_with_suggestion() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let mut stock = StockLoadout::default();
        stock
            .items
            .insert(Location::LeftArm, vec!["medium-lazer".to_string()]);
        let chassis = chassis_with_stock(stock);

        let err = factory.produce_stock(&chassis).expect_err("unknown id");
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert!(err.to_string().contains("Did you mean 'medium-laser'?"));
    }

    #[test]
    fn stock_requires_reference_data() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = Arc::new(ChassisBuilder::new("BARE-1", 30).build());
        let err = factory.produce_stock(&chassis).expect_err("no stock data");
        assert!(matches!(err, Error::MissingStockData { .. }));
    }

    #[test]
    fn stock_tonnage_drift_is_reported() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let mut stock = StockLoadout::default();
        stock
            .items
            .insert(Location::LeftArm, vec!["medium-laser".to_string()]);
        stock.expected_tons = Some(7.0);
        let chassis = chassis_with_stock(stock);

        let err = factory.produce_stock(&chassis).expect_err("tonnage drift");
        match err {
            Error::StockTonnageMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 7.0);
                assert_eq!(actual, 6.0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn clone_is_equal_and_isolated() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let mut stock = StockLoadout::default();
        stock
            .items
            .insert(Location::LeftArm, vec!["medium-laser".to_string()]);
        stock.armor.insert(Location::CenterTorso, 20);
        let chassis = chassis_with_stock(stock);

        let original = factory.produce_stock(&chassis).expect("stock fits");
        let mut copy = factory.produce_clone(&original).expect("clone succeeds");
        assert_eq!(copy, original);

        copy.set_armor(Location::CenterTorso, 4).expect("armor fits");
        copy.remove_item(Location::LeftArm, "medium-laser");
        assert_eq!(original.component(Location::CenterTorso).armor(), 20);
        assert_eq!(original.component(Location::LeftArm).items().len(), 1);
        assert_ne!(copy, original);
    }

    #[test]
    fn produce_dispatches_on_construction() {
        let catalog = catalog();
        let factory = StandardLoadoutFactory::new(&catalog);
        let chassis = chassis_with_stock(StockLoadout::default());
        let settings = LoadoutSettings::default();

        let empty = factory
            .produce(&chassis, Construction::Empty)
            .expect("empty never fails");
        let default = factory
            .produce(&chassis, Construction::Default(&settings))
            .expect("full armor fits");
        let clone = factory
            .produce(&chassis, Construction::Clone(&default))
            .expect("clone succeeds");
        assert_eq!(empty.armor_total(), 0);
        assert_eq!(default.armor_total(), chassis.max_armor());
        assert_eq!(clone, default);
        assert_eq!(Construction::Empty.label(), "empty");
        assert_eq!(Construction::Default(&settings).label(), "default");
        assert_eq!(Construction::Stock.label(), "stock");
        assert_eq!(Construction::Clone(&default).label(), "clone");
    }
}
