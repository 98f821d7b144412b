use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::database::models::{Especialidade, NovaEspecialidade};
use crate::database::{ClinicaRepository, DatabaseError, EspecialidadeRepository};

use super::{clinic_not_found, conflict_on_unique_violation, ServiceError, ServiceResult};

/// Canonical form of a specialty name: whitespace trimmed and collapsed,
/// every word capitalized, the rest of each word lower case.
pub fn normalize_name(nome: &str) -> String {
    nome.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    let upper = first.to_uppercase();
    // Multi-char upper forms ('ß' -> "SS") would not be stable under renormalization
    if upper.len() == 1 {
        out.extend(upper);
    } else {
        out.push(first);
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

fn duplicate_name(nome: &str) -> String {
    format!("Já existe uma especialidade com o nome '{nome}' nesta clínica")
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Especialidade não encontrada com ID: {id}"))
}

/// Specialties are owned by exactly one clinic; every operation takes the
/// clinic id and never touches rows of another clinic.
#[derive(Clone)]
pub struct EspecialidadeService {
    especialidades: Arc<dyn EspecialidadeRepository>,
    clinicas: Arc<dyn ClinicaRepository>,
}

impl EspecialidadeService {
    pub fn new(
        especialidades: Arc<dyn EspecialidadeRepository>,
        clinicas: Arc<dyn ClinicaRepository>,
    ) -> Self {
        Self {
            especialidades,
            clinicas,
        }
    }

    pub async fn list_by_clinic(&self, clinica_id: i64) -> ServiceResult<Vec<Especialidade>> {
        Ok(self.especialidades.find_by_clinica_id(clinica_id).await?)
    }

    pub async fn get_by_id_and_clinic(&self, id: i64, clinica_id: i64) -> ServiceResult<Especialidade> {
        self.especialidades
            .find_by_id_and_clinica_id(id, clinica_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, clinica_id: i64, nome: &str) -> ServiceResult<Especialidade> {
        if self.clinicas.find_by_id(clinica_id).await?.is_none() {
            return Err(clinic_not_found());
        }

        let nome = normalize_name(nome);
        if self
            .especialidades
            .exists_by_nome_ignore_case_and_clinica_id(&nome, clinica_id)
            .await?
        {
            warn!("Rejected duplicate specialty '{}' in clinic {}", nome, clinica_id);
            return Err(ServiceError::Conflict(duplicate_name(&nome)));
        }

        let conflict = duplicate_name(&nome);
        let saved = self
            .especialidades
            .insert(NovaEspecialidade { nome, clinica_id })
            .await
            .map_err(|err| match err {
                DatabaseError::ForeignKeyViolation(_) => clinic_not_found(),
                other => conflict_on_unique_violation(conflict)(other),
            })?;

        info!("Created specialty {} '{}' in clinic {}", saved.id, saved.nome, clinica_id);
        Ok(saved)
    }

    pub async fn update(&self, id: i64, clinica_id: i64, nome: &str) -> ServiceResult<Especialidade> {
        let mut existente = self.get_by_id_and_clinic(id, clinica_id).await?;

        let nome = normalize_name(nome);
        if existente.nome.to_lowercase() != nome.to_lowercase() {
            if self
                .especialidades
                .exists_by_nome_ignore_case_and_clinica_id_and_id_not(&nome, clinica_id, id)
                .await?
            {
                warn!("Rejected rename of specialty {} to duplicate '{}'", id, nome);
                return Err(ServiceError::Conflict(duplicate_name(&nome)));
            }
        } else {
            debug!("Specialty {} keeps its name; duplicate check skipped", id);
        }

        let conflict = duplicate_name(&nome);
        existente.nome = nome;
        let updated = self
            .especialidades
            .update(&existente)
            .await
            .map_err(|err| match err {
                DatabaseError::NotFound(_) => not_found(id),
                other => conflict_on_unique_violation(conflict)(other),
            })?;

        info!("Updated specialty {} in clinic {}", id, clinica_id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, clinica_id: i64) -> ServiceResult<()> {
        self.get_by_id_and_clinic(id, clinica_id).await?;

        self.especialidades
            .delete(id, clinica_id)
            .await
            .map_err(|err| match err {
                DatabaseError::NotFound(_) => not_found(id),
                other => other.into(),
            })?;

        info!("Deleted specialty {} from clinic {}", id, clinica_id);
        Ok(())
    }

    /// Resolves each id inside the clinic. Ids that do not resolve are left
    /// out of the result; repeated ids are resolved once.
    ///
    /// Not routed; callers that attach specialties to other records use it directly.
    pub async fn find_many_by_ids_and_clinic(
        &self,
        ids: Option<&[i64]>,
        clinica_id: i64,
    ) -> ServiceResult<Vec<Especialidade>> {
        let ids: BTreeSet<i64> = match ids {
            Some(ids) if !ids.is_empty() => ids.iter().copied().collect(),
            _ => {
                return Err(ServiceError::Business(
                    "É necessário informar pelo menos uma especialidade".to_string(),
                ))
            }
        };

        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            match self.especialidades.find_by_id_and_clinica_id(id, clinica_id).await? {
                Some(especialidade) => found.push(especialidade),
                None => debug!("Specialty {} not found in clinic {}", id, clinica_id),
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::database::models::NovaClinica;
    use crate::database::InMemoryStore;

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: EspecialidadeService,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let service = EspecialidadeService::new(store.clone(), store.clone());
            Self { store, service }
        }

        async fn clinica(&self, subdominio: &str) -> i64 {
            ClinicaRepository::insert(
                self.store.as_ref(),
                NovaClinica {
                    nome_fantasia: format!("Clínica {subdominio}"),
                    subdominio: subdominio.to_string(),
                    ativo: true,
                },
            )
            .await
            .unwrap()
            .id
        }
    }

    /// Records calls to `delete` and forwards everything to the store
    struct DeleteSpy {
        inner: Arc<InMemoryStore>,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl EspecialidadeRepository for DeleteSpy {
        async fn find_by_clinica_id(&self, clinica_id: i64) -> Result<Vec<Especialidade>, DatabaseError> {
            EspecialidadeRepository::find_by_clinica_id(self.inner.as_ref(), clinica_id).await
        }

        async fn find_by_id_and_clinica_id(
            &self,
            id: i64,
            clinica_id: i64,
        ) -> Result<Option<Especialidade>, DatabaseError> {
            EspecialidadeRepository::find_by_id_and_clinica_id(self.inner.as_ref(), id, clinica_id).await
        }

        async fn exists_by_nome_ignore_case_and_clinica_id(
            &self,
            nome: &str,
            clinica_id: i64,
        ) -> Result<bool, DatabaseError> {
            self.inner.exists_by_nome_ignore_case_and_clinica_id(nome, clinica_id).await
        }

        async fn exists_by_nome_ignore_case_and_clinica_id_and_id_not(
            &self,
            nome: &str,
            clinica_id: i64,
            id: i64,
        ) -> Result<bool, DatabaseError> {
            self.inner
                .exists_by_nome_ignore_case_and_clinica_id_and_id_not(nome, clinica_id, id)
                .await
        }

        async fn insert(&self, especialidade: NovaEspecialidade) -> Result<Especialidade, DatabaseError> {
            EspecialidadeRepository::insert(self.inner.as_ref(), especialidade).await
        }

        async fn update(&self, especialidade: &Especialidade) -> Result<Especialidade, DatabaseError> {
            EspecialidadeRepository::update(self.inner.as_ref(), especialidade).await
        }

        async fn delete(&self, id: i64, clinica_id: i64) -> Result<(), DatabaseError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            EspecialidadeRepository::delete(self.inner.as_ref(), id, clinica_id).await
        }
    }

    #[test]
    fn normalizes_to_title_case() {
        assert_eq!(normalize_name("cardiologia clínica"), "Cardiologia Clínica");
        assert_eq!(normalize_name("  CIRURGIA   plástica "), "Cirurgia Plástica");
        assert_eq!(normalize_name("ortopedia"), "Ortopedia");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for nome in ["cardiologia clínica", "ÉTICA médica", "ßpezial", "neuro-cirurgia  infantil"] {
            let once = normalize_name(nome);
            assert_eq!(normalize_name(&once), once, "input: {nome}");
        }
    }

    #[tokio::test]
    async fn list_is_scoped_and_empty_when_none() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let c2 = f.clinica("c2").await;
        f.service.create(c1, "Cardiologia").await.unwrap();
        f.service.create(c1, "Pediatria").await.unwrap();

        let nomes: Vec<_> = f
            .service
            .list_by_clinic(c1)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.nome)
            .collect();
        assert_eq!(nomes, ["Cardiologia", "Pediatria"]);
        assert!(f.service.list_by_clinic(c2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_normalizes_name() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;

        let saved = f.service.create(c1, "cardiologia clínica").await.unwrap();

        assert_eq!(saved.nome, "Cardiologia Clínica");
        assert_eq!(saved.clinica_id, c1);
    }

    #[tokio::test]
    async fn create_in_missing_clinic_is_not_found() {
        let f = Fixture::new();

        let err = f.service.create(77, "Cardiologia").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg == "Clínica não encontrada"));
    }

    #[tokio::test]
    async fn duplicate_name_in_same_clinic_conflicts_case_insensitively() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        f.service.create(c1, "Cardiologia").await.unwrap();

        let err = f.service.create(c1, "CARDIOLOGIA").await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Conflict(ref msg)
                if msg == "Já existe uma especialidade com o nome 'Cardiologia' nesta clínica"
        ));
    }

    #[tokio::test]
    async fn same_name_in_different_clinics_is_allowed() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let c2 = f.clinica("c2").await;

        f.service.create(c1, "Cardiologia").await.unwrap();
        f.service.create(c2, "CARDIOLOGIA").await.unwrap();

        assert_eq!(f.service.list_by_clinic(c2).await.unwrap()[0].nome, "Cardiologia");
    }

    #[tokio::test]
    async fn lookup_under_another_clinic_is_not_found() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let c2 = f.clinica("c2").await;
        let saved = f.service.create(c1, "Cardiologia").await.unwrap();

        let err = f.service.get_by_id_and_clinic(saved.id, c2).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg.contains("Especialidade não encontrada")));
        assert_eq!(f.service.get_by_id_and_clinic(saved.id, c1).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn update_with_case_change_only_succeeds() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let saved = f.service.create(c1, "Cardiologia").await.unwrap();

        let updated = f.service.update(saved.id, c1, "CARDIOLOGIA").await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.nome, "Cardiologia");
    }

    #[tokio::test]
    async fn update_to_name_held_by_another_record_conflicts() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        f.service.create(c1, "Cardiologia").await.unwrap();
        let pediatria = f.service.create(c1, "Pediatria").await.unwrap();

        let err = f.service.update(pediatria.id, c1, "cardiologia").await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(
            f.service.get_by_id_and_clinic(pediatria.id, c1).await.unwrap().nome,
            "Pediatria"
        );
    }

    #[tokio::test]
    async fn update_renames_and_normalizes() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let saved = f.service.create(c1, "Cardiologia").await.unwrap();

        let updated = f.service.update(saved.id, c1, "cardiologia pediátrica").await.unwrap();

        assert_eq!(updated.nome, "Cardiologia Pediátrica");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;

        assert!(matches!(
            f.service.update(999, c1, "Cardiologia").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_never_reaches_repository_delete() {
        let store = Arc::new(InMemoryStore::new());
        let spy = Arc::new(DeleteSpy {
            inner: store.clone(),
            deletes: AtomicUsize::new(0),
        });
        let service = EspecialidadeService::new(spy.clone(), store.clone());
        let c1 = ClinicaRepository::insert(
            store.as_ref(),
            NovaClinica {
                nome_fantasia: "Clínica Um".to_string(),
                subdominio: "um".to_string(),
                ativo: true,
            },
        )
        .await
        .unwrap()
        .id;

        let err = service.delete(999, c1).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(spy.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_removes_specialty() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let saved = f.service.create(c1, "Cardiologia").await.unwrap();

        f.service.delete(saved.id, c1).await.unwrap();

        assert!(f.service.list_by_clinic(c1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_many_requires_at_least_one_id() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;

        for ids in [None, Some(&[][..])] {
            let err = f.service.find_many_by_ids_and_clinic(ids, c1).await.unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Business(ref msg)
                    if msg == "É necessário informar pelo menos uma especialidade"
            ));
        }
    }

    #[tokio::test]
    async fn find_many_returns_only_ids_of_the_clinic() {
        let f = Fixture::new();
        let c1 = f.clinica("c1").await;
        let c2 = f.clinica("c2").await;
        let cardio = f.service.create(c1, "Cardiologia").await.unwrap();
        let pedia = f.service.create(c1, "Pediatria").await.unwrap();
        let alheia = f.service.create(c2, "Ortopedia").await.unwrap();

        let found = f
            .service
            .find_many_by_ids_and_clinic(Some(&[pedia.id, cardio.id, alheia.id, 999, cardio.id][..]), c1)
            .await
            .unwrap();

        assert_eq!(found, vec![cardio, pedia]);
    }

    #[tokio::test]
    async fn clinic_removed_before_insert_is_not_found() {
        // The clinic lookup sees a clinic that the specialty table no longer references
        let clinicas = Arc::new(InMemoryStore::new());
        let especialidades = Arc::new(InMemoryStore::new());
        let clinica = ClinicaRepository::insert(
            clinicas.as_ref(),
            NovaClinica {
                nome_fantasia: "Clínica Norte".to_string(),
                subdominio: "norte".to_string(),
                ativo: true,
            },
        )
        .await
        .unwrap();
        let service = EspecialidadeService::new(especialidades, clinicas);

        let err = service.create(clinica.id, "Cardiologia").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref msg) if msg == "Clínica não encontrada"));
    }
}
