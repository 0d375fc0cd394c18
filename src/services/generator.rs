//! Generator catalog service
//!
//! Business logic for the generator model catalog: CRUD, archiving, and
//! stock adjustments.

use crate::audit::{AuditAction, AuditRecorder, Snapshot};
use crate::error::{AdminError, AdminResult};
use crate::models::{FuelType, GeneratorId, GeneratorModel, Module, PermissionAction};
use crate::session::Session;
use crate::storage::Storage;

/// Optional field updates for a catalog entry
#[derive(Debug, Clone, Default)]
pub struct GeneratorPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub fuel: Option<FuelType>,
    pub power_kw: Option<f64>,
    pub price_cents: Option<i64>,
    pub description: Option<String>,
}

/// Service for catalog management
pub struct GeneratorService<'a> {
    storage: &'a Storage,
    session: &'a Session,
}

impl<'a> GeneratorService<'a> {
    /// Create a new generator service
    pub fn new(storage: &'a Storage, session: &'a Session) -> Self {
        Self { storage, session }
    }

    fn recorder(&self) -> AuditRecorder<'_> {
        AuditRecorder::new(&self.storage.audit_log)
    }

    fn get_required(&self, id: GeneratorId) -> AdminResult<GeneratorModel> {
        self.storage
            .generators
            .get(id)?
            .ok_or_else(|| AdminError::generator_not_found(id.to_string()))
    }

    /// Add a model to the catalog
    pub fn create(
        &self,
        name: &str,
        brand: &str,
        fuel: FuelType,
        power_kw: f64,
        price_cents: i64,
    ) -> AdminResult<GeneratorModel> {
        self.session.require(Module::Generators, PermissionAction::Create)?;

        let generator = GeneratorModel::new(name.trim(), brand.trim(), fuel, power_kw, price_cents);
        generator
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        if self.storage.generators.get_by_name(&generator.name)?.is_some() {
            return Err(AdminError::Duplicate {
                entity_type: "Generator",
                identifier: generator.name.clone(),
            });
        }

        self.storage.generators.upsert(generator.clone())?;
        self.storage.generators.save()?;

        let after = Snapshot::from(&generator);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::CreatedGenerator,
            after.entity_ref(),
            None,
            Some(&after),
            None,
        );

        Ok(generator)
    }

    /// Get a model by ID
    pub fn get(&self, id: GeneratorId) -> AdminResult<Option<GeneratorModel>> {
        self.session.require(Module::Generators, PermissionAction::Read)?;
        self.storage.generators.get(id)
    }

    /// Find a model by name or ID string
    pub fn find(&self, identifier: &str) -> AdminResult<Option<GeneratorModel>> {
        self.session.require(Module::Generators, PermissionAction::Read)?;

        if let Some(generator) = self.storage.generators.get_by_name(identifier)? {
            return Ok(Some(generator));
        }

        if let Ok(id) = identifier.parse::<GeneratorId>() {
            return self.storage.generators.get(id);
        }

        Ok(None)
    }

    /// List catalog entries
    pub fn list(&self, include_archived: bool) -> AdminResult<Vec<GeneratorModel>> {
        self.session.require(Module::Generators, PermissionAction::Read)?;

        if include_archived {
            self.storage.generators.get_all()
        } else {
            self.storage.generators.get_active()
        }
    }

    /// Apply a patch to a catalog entry
    pub fn update(&self, id: GeneratorId, patch: GeneratorPatch) -> AdminResult<GeneratorModel> {
        self.session.require(Module::Generators, PermissionAction::Update)?;

        let before = self.get_required(id)?;

        let mut generator = before.clone();
        if let Some(name) = patch.name {
            generator.name = name;
        }
        if let Some(brand) = patch.brand {
            generator.brand = brand;
        }
        if let Some(fuel) = patch.fuel {
            generator.fuel = fuel;
        }
        if let Some(power_kw) = patch.power_kw {
            generator.power_kw = power_kw;
        }
        if let Some(price_cents) = patch.price_cents {
            generator.price_cents = price_cents;
        }
        if let Some(description) = patch.description {
            generator.description = description;
        }
        generator.touch();

        generator
            .validate()
            .map_err(|e| AdminError::Validation(e.to_string()))?;

        self.storage.generators.upsert(generator.clone())?;
        self.storage.generators.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&generator);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::UpdatedGenerator,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(generator)
    }

    /// Archive a model (no longer offered for sale)
    pub fn archive(&self, id: GeneratorId) -> AdminResult<GeneratorModel> {
        self.set_archived(id, true, AuditAction::ArchivedGenerator)
    }

    /// Return an archived model to the catalog
    pub fn unarchive(&self, id: GeneratorId) -> AdminResult<GeneratorModel> {
        self.set_archived(id, false, AuditAction::UnarchivedGenerator)
    }

    fn set_archived(
        &self,
        id: GeneratorId,
        archived: bool,
        action: AuditAction,
    ) -> AdminResult<GeneratorModel> {
        self.session.require(Module::Generators, PermissionAction::Update)?;

        let before = self.get_required(id)?;

        let mut generator = before.clone();
        generator.archived = archived;
        generator.touch();

        self.storage.generators.upsert(generator.clone())?;
        self.storage.generators.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&generator);
        self.recorder().record_best_effort(
            self.session,
            action,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(generator)
    }

    /// Adjust stock by a signed delta
    ///
    /// Fails when the adjustment would take stock below zero.
    pub fn adjust_stock(&self, id: GeneratorId, delta: i64) -> AdminResult<GeneratorModel> {
        self.session.require(Module::Generators, PermissionAction::Update)?;

        let before = self.get_required(id)?;

        let new_stock = i64::from(before.stock) + delta;
        if new_stock < 0 {
            return Err(AdminError::Validation(format!(
                "Stock cannot go below zero: have {}, adjusting by {}",
                before.stock, delta
            )));
        }
        let new_stock = u32::try_from(new_stock).map_err(|_| {
            AdminError::Validation(format!("Stock adjustment out of range: {}", new_stock))
        })?;

        let mut generator = before.clone();
        generator.stock = new_stock;
        generator.touch();

        self.storage.generators.upsert(generator.clone())?;
        self.storage.generators.save()?;

        let before_snap = Snapshot::from(&before);
        let after_snap = Snapshot::from(&generator);
        self.recorder().record_best_effort(
            self.session,
            AuditAction::AdjustedGeneratorStock,
            after_snap.entity_ref(),
            Some(&before_snap),
            Some(&after_snap),
            None,
        );

        Ok(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditFilter, EntityType};
    use crate::config::paths::AdminPaths;
    use crate::models::{AdminRole, AdminUser};
    use tempfile::TempDir;

    fn setup() -> (Storage, Session, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let root = AdminUser::new("Root", "root@example.com", AdminRole::SuperAdmin);
        let session = Session::sign_in(&root).unwrap();

        (storage, session, temp_dir)
    }

    #[test]
    fn test_create_and_list() {
        let (storage, session, _temp) = setup();
        let service = GeneratorService::new(&storage, &session);

        service
            .create("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900)
            .unwrap();

        let catalog = service.list(false).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].brand, "Volta");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (storage, session, _temp) = setup();
        let service = GeneratorService::new(&storage, &session);

        service
            .create("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900)
            .unwrap();
        assert!(matches!(
            service.create("PowerMax 7500E", "Other", FuelType::Solar, 3.0, 99_900),
            Err(AdminError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_archive_hides_from_default_list() {
        let (storage, session, _temp) = setup();
        let service = GeneratorService::new(&storage, &session);

        let generator = service
            .create("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900)
            .unwrap();
        service.archive(generator.id).unwrap();

        assert!(service.list(false).unwrap().is_empty());
        assert_eq!(service.list(true).unwrap().len(), 1);

        service.unarchive(generator.id).unwrap();
        assert_eq!(service.list(false).unwrap().len(), 1);
    }

    #[test]
    fn test_adjust_stock_bounds() {
        let (storage, session, _temp) = setup();
        let service = GeneratorService::new(&storage, &session);

        let generator = service
            .create("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900)
            .unwrap();

        let generator = service.adjust_stock(generator.id, 5).unwrap();
        assert_eq!(generator.stock, 5);

        let generator = service.adjust_stock(generator.id, -3).unwrap();
        assert_eq!(generator.stock, 2);

        assert!(service.adjust_stock(generator.id, -3).is_err());
    }

    #[test]
    fn test_stock_adjustment_audited_with_diff() {
        let (storage, session, _temp) = setup();
        let service = GeneratorService::new(&storage, &session);

        let generator = service
            .create("PowerMax 7500E", "Volta", FuelType::Diesel, 7.5, 129_900)
            .unwrap();
        service.adjust_stock(generator.id, 4).unwrap();

        let entries = storage
            .audit_log
            .query(
                &AuditFilter::for_entity(EntityType::Generator, generator.id.to_string())
                    .with_action(AuditAction::AdjustedGeneratorStock),
            )
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].changes, vec!["stock: \"0\" → \"4\"".to_string()]);
    }
}
