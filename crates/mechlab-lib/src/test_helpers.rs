// Test-only helpers for `mechlab-lib` tests
#![allow(dead_code)]

use crate::chassis::{Chassis, ChassisRecord, ComponentDef, StockLoadout};
use crate::equipment::{EngineSpec, EngineType, Equipment, EquipmentKind};
use crate::location::{HardpointType, Location};

/// Builder to create `Chassis` instances in tests with a standard biped
/// layout: 6 head slots (5 fixed), 12 arm slots (4 fixed), 12 torso slots
/// (4 fixed in the center torso) and 6 leg slots (4 fixed).
pub struct ChassisBuilder {
    record: ChassisRecord,
}

impl ChassisBuilder {
    #[must_use]
    pub fn new(name: &str, mass_tons: u32) -> Self {
        let components = Location::ALL
            .into_iter()
            .map(|location| {
                let (slots, fixed_slots, internal_points) = match location {
                    Location::Head => (6, 5, 3),
                    Location::CenterTorso => (12, 4, mass_tons / 3),
                    Location::LeftTorso | Location::RightTorso => (12, 0, mass_tons / 4),
                    Location::LeftArm | Location::RightArm => (12, 4, mass_tons / 6),
                    Location::LeftLeg | Location::RightLeg => (6, 4, mass_tons / 4),
                };
                ComponentDef {
                    location,
                    slots,
                    fixed_slots,
                    internal_points,
                    hardpoints: Vec::new(),
                }
            })
            .collect();

        Self {
            record: ChassisRecord {
                name: name.to_string(),
                series: "Test".to_string(),
                mass_tons,
                engine_min: 100,
                engine_max: 300,
                components,
                stock: None,
            },
        }
    }

    pub fn hardpoints(mut self, location: Location, hardpoints: &[HardpointType]) -> Self {
        if let Some(component) = self
            .record
            .components
            .iter_mut()
            .find(|c| c.location == location)
        {
            component.hardpoints = hardpoints.to_vec();
        }
        self
    }

    pub fn stock(mut self, stock: StockLoadout) -> Self {
        self.record.stock = Some(stock);
        self
    }

    pub fn record(self) -> ChassisRecord {
        self.record
    }

    pub fn build(self) -> Chassis {
        Chassis::new(self.record).expect("test chassis is valid")
    }
}

/// Builder to create `Equipment` instances in tests with sensible defaults.
pub struct EquipmentBuilder {
    item: Equipment,
}

impl EquipmentBuilder {
    #[must_use]
    pub fn new(id: &str, kind: EquipmentKind) -> Self {
        Self {
            item: Equipment {
                id: id.to_string(),
                name: id.to_string(),
                kind,
                hardpoint: None,
                slots: 1,
                tons: 1.0,
                heat: 0.0,
                engine: None,
            },
        }
    }

    #[must_use]
    pub fn weapon(id: &str, hardpoint: HardpointType) -> Self {
        let mut builder = Self::new(id, EquipmentKind::Weapon);
        builder.item.hardpoint = Some(hardpoint);
        builder
    }

    #[must_use]
    pub fn engine(engine_type: EngineType, rating: u32) -> Self {
        let mut builder =
            Self::new(&format!("engine-{engine_type}-{rating}"), EquipmentKind::Engine);
        builder.item.slots = 6;
        builder.item.tons = 6.0;
        builder.item.engine = Some(EngineSpec {
            engine_type,
            rating,
        });
        builder
    }

    pub fn slots(mut self, slots: u32) -> Self {
        self.item.slots = slots;
        self
    }

    pub fn tons(mut self, tons: f64) -> Self {
        self.item.tons = tons;
        self
    }

    pub fn heat(mut self, heat: f64) -> Self {
        self.item.heat = heat;
        self
    }

    pub fn build(self) -> Equipment {
        self.item
    }
}
