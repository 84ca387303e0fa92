//! Evaluador de vencimientos
//!
//! Funciones puras, sin I/O: a partir del estado actual de un vehículo
//! (fechas de obligaciones, odómetro, último service con próxima revisión
//! declarada y neumáticos) producen a lo sumo una evaluación por categoría.
//! La fecha "hoy" se inyecta siempre; nada aquí consulta el reloj.
//!
//! Obligaciones con datos faltantes (fecha o km desconocidos) se excluyen
//! del resultado, nunca se les inventa un valor por defecto.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ReminderConfig;
use crate::models::service_record::{latest_with_next_due, ServiceRecord};
use crate::models::task::TaskCategory;
use crate::models::tire::Tire;
use crate::models::vehicle::Vehicle;

/// Estado de una obligación respecto de su vencimiento
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Ok,
    DueSoon,
    Overdue,
}

impl DueStatus {
    /// La obligación requiere una tarea abierta
    pub fn needs_task(&self) -> bool {
        matches!(self, DueStatus::DueSoon | DueStatus::Overdue)
    }
}

/// Evaluación de una obligación de un vehículo
#[derive(Debug, Clone, Serialize)]
pub struct ObligationAssessment {
    pub category: TaskCategory,
    pub status: DueStatus,
    pub due_date: Option<NaiveDate>,
    pub due_km: Option<i32>,
    pub days_remaining: Option<i64>,
    pub remaining_km: Option<i32>,
    /// Qué elemento concreto dispara la obligación, p. ej. la posición
    /// del neumático más gastado
    pub subject: Option<String>,
    /// Resto normalizado sobre el umbral de su criterio; menor es más
    /// urgente, negativo si ya venció. Solo ordena la presentación.
    pub urgency: f64,
    pub summary: String,
}

/// Regla de fecha: vencida si faltan días negativos, próxima si faltan
/// entre 0 y el horizonte inclusive.
fn classify_by_date(due: NaiveDate, today: NaiveDate, horizon_days: i64) -> (DueStatus, i64) {
    let days_remaining = (due - today).num_days();
    let status = if days_remaining < 0 {
        DueStatus::Overdue
    } else if days_remaining <= horizon_days {
        DueStatus::DueSoon
    } else {
        DueStatus::Ok
    };
    (status, days_remaining)
}

/// Regla de kilometraje: vencida con resto cero o negativo, próxima con
/// resto positivo dentro del umbral.
fn classify_by_km(remaining_km: i32, threshold_km: i32) -> DueStatus {
    if remaining_km <= 0 {
        DueStatus::Overdue
    } else if remaining_km <= threshold_km {
        DueStatus::DueSoon
    } else {
        DueStatus::Ok
    }
}

fn date_urgency(days_remaining: i64, horizon_days: i64) -> f64 {
    days_remaining as f64 / horizon_days.max(1) as f64
}

fn km_urgency(remaining_km: i32, threshold_km: i32) -> f64 {
    remaining_km as f64 / threshold_km.max(1) as f64
}

fn date_summary(category: TaskCategory, due: NaiveDate, days_remaining: i64) -> String {
    if days_remaining < 0 {
        format!(
            "{}: venció el {} (hace {} días)",
            category.label(),
            due,
            -days_remaining
        )
    } else {
        format!("{}: vence el {} (en {} días)", category.label(), due, days_remaining)
    }
}

/// Evaluación por regla de fecha para una categoría
fn assess_date_obligation(
    category: TaskCategory,
    due: NaiveDate,
    today: NaiveDate,
    horizon_days: i64,
) -> ObligationAssessment {
    let (status, days_remaining) = classify_by_date(due, today, horizon_days);

    ObligationAssessment {
        category,
        status,
        due_date: Some(due),
        due_km: None,
        days_remaining: Some(days_remaining),
        remaining_km: None,
        subject: None,
        urgency: date_urgency(days_remaining, horizon_days),
        summary: date_summary(category, due, days_remaining),
    }
}

/// Service: puede declarar próxima revisión por km, por fecha o por ambas.
/// Cuando hay dos criterios gobierna el de menor resto normalizado; ambos
/// valores sobreviven en la evaluación.
fn assess_service(
    vehicle: &Vehicle,
    record: &ServiceRecord,
    today: NaiveDate,
    config: &ReminderConfig,
) -> Option<ObligationAssessment> {
    let km_criterion = record.next_service_km.map(|next_km| {
        let remaining = next_km - vehicle.current_km;
        let status = classify_by_km(remaining, config.service_km_threshold);
        let urgency = km_urgency(remaining, config.service_km_threshold);
        let summary = if remaining <= 0 {
            format!(
                "Service: excedido por {} km (previsto a los {} km)",
                -remaining, next_km
            )
        } else {
            format!("Service: faltan {} km (previsto a los {} km)", remaining, next_km)
        };
        (status, urgency, remaining, summary)
    });

    let date_criterion = record.next_service_date.map(|due| {
        let (status, days) = classify_by_date(due, today, config.horizon_days);
        let urgency = date_urgency(days, config.horizon_days);
        let summary = date_summary(TaskCategory::Service, due, days);
        (status, urgency, days, summary)
    });

    match (km_criterion, date_criterion) {
        (None, None) => None,

        (Some((status, urgency, remaining, summary)), None) => Some(ObligationAssessment {
            category: TaskCategory::Service,
            status,
            due_date: None,
            due_km: record.next_service_km,
            days_remaining: None,
            remaining_km: Some(remaining),
            subject: None,
            urgency,
            summary,
        }),

        (None, Some((status, urgency, days, summary))) => Some(ObligationAssessment {
            category: TaskCategory::Service,
            status,
            due_date: record.next_service_date,
            due_km: None,
            days_remaining: Some(days),
            remaining_km: None,
            subject: None,
            urgency,
            summary,
        }),

        (Some((km_status, km_urg, remaining, km_text)), Some((date_status, date_urg, days, date_text))) => {
            let km_governs = km_urg <= date_urg;
            let (status, urgency, summary) = if km_governs {
                (km_status, km_urg, km_text)
            } else {
                (date_status, date_urg, date_text)
            };

            Some(ObligationAssessment {
                category: TaskCategory::Service,
                status,
                due_date: record.next_service_date,
                due_km: record.next_service_km,
                days_remaining: Some(days),
                remaining_km: Some(remaining),
                subject: None,
                urgency,
                summary,
            })
        }
    }
}

/// Cambio de neumáticos: se evalúa cada posición con vida útil declarada
/// y se emite una sola evaluación, la del neumático más urgente.
fn assess_tires(
    vehicle: &Vehicle,
    tires: &[Tire],
    config: &ReminderConfig,
) -> Option<ObligationAssessment> {
    tires
        .iter()
        .filter_map(|tire| {
            let lifetime = tire.estimated_lifetime_km?;
            let remaining = lifetime - (vehicle.current_km - tire.installed_km);
            Some((tire, remaining))
        })
        .min_by_key(|(_, remaining)| *remaining)
        .map(|(tire, remaining)| {
            let status = classify_by_km(remaining, config.tire_km_threshold);
            let summary = if remaining <= 0 {
                format!(
                    "Cambio de neumáticos: posición {} excedida por {} km",
                    tire.position, -remaining
                )
            } else {
                format!(
                    "Cambio de neumáticos: posición {}, quedan {} km de vida útil",
                    tire.position, remaining
                )
            };

            ObligationAssessment {
                category: TaskCategory::TireChange,
                status,
                due_date: None,
                due_km: tire.estimated_lifetime_km.map(|l| tire.installed_km + l),
                days_remaining: None,
                remaining_km: Some(remaining),
                subject: Some(tire.position.clone()),
                urgency: km_urgency(remaining, config.tire_km_threshold),
                summary,
            }
        })
}

/// Evaluar todas las obligaciones conocidas de un vehículo.
///
/// Devuelve a lo sumo una evaluación por categoría, incluidas las que
/// están en regla: el sincronizador necesita saber que una obligación
/// volvió a estado `Ok` para cerrar su tarea.
pub fn evaluate_vehicle(
    vehicle: &Vehicle,
    service_records: &[ServiceRecord],
    tires: &[Tire],
    today: NaiveDate,
    config: &ReminderConfig,
) -> Vec<ObligationAssessment> {
    let mut assessments = Vec::new();

    // Revisión técnica: solo para vehículos alcanzados por la obligación
    if vehicle.subject_to_inspection {
        if let Some(due) = vehicle.inspection_valid_until {
            assessments.push(assess_date_obligation(
                TaskCategory::Inspection,
                due,
                today,
                config.horizon_days,
            ));
        }
    }

    if let Some(due) = vehicle.exhaust_check_due {
        assessments.push(assess_date_obligation(
            TaskCategory::ExhaustCheck,
            due,
            today,
            config.horizon_days,
        ));
    }

    if let Some(due) = vehicle.insurance_valid_until {
        assessments.push(assess_date_obligation(
            TaskCategory::Insurance,
            due,
            today,
            config.horizon_days,
        ));
    }

    if let Some(record) = latest_with_next_due(service_records) {
        if let Some(assessment) = assess_service(vehicle, record, today, config) {
            assessments.push(assessment);
        }
    }

    if let Some(assessment) = assess_tires(vehicle, tires, config) {
        assessments.push(assessment);
    }

    assessments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn test_vehicle() -> Vehicle {
        Vehicle::new(
            Uuid::new_v4(),
            "AB 123 CD".to_string(),
            Some("Renault".to_string()),
            Some("Master".to_string()),
            Some(2020),
            59_600,
            2,
            false,
            true,
            None,
            None,
            None,
        )
    }

    fn test_config() -> ReminderConfig {
        ReminderConfig {
            horizon_days: 30,
            service_km_threshold: 500,
            tire_km_threshold: 1000,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn service_record(
        vehicle: &Vehicle,
        next_km: Option<i32>,
        next_date: Option<NaiveDate>,
    ) -> ServiceRecord {
        ServiceRecord {
            id: Uuid::new_v4(),
            account_id: vehicle.account_id,
            vehicle_id: vehicle.id,
            performed_on: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            odometer_km: 50_000,
            next_service_km: next_km,
            next_service_date: next_date,
            cost: None,
            title: "Service de rutina".to_string(),
            notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn tire_with_lifetime(vehicle: &Vehicle, position: &str, installed_km: i32, lifetime: i32) -> Tire {
        let mut tire = Tire::empty(
            vehicle.account_id,
            vehicle.id,
            position.to_string(),
            installed_km,
        );
        tire.estimated_lifetime_km = Some(lifetime);
        tire
    }

    fn find(assessments: &[ObligationAssessment], category: TaskCategory) -> Option<&ObligationAssessment> {
        assessments.iter().find(|a| a.category == category)
    }

    #[test]
    fn test_inspection_skipped_when_not_subject() {
        let mut vehicle = test_vehicle();
        vehicle.subject_to_inspection = false;
        vehicle.inspection_valid_until = Some(today() + Duration::days(5));

        let assessments = evaluate_vehicle(&vehicle, &[], &[], today(), &test_config());

        // La bandera gana: aunque haya fecha cargada no se evalúa
        assert!(find(&assessments, TaskCategory::Inspection).is_none());
    }

    #[test]
    fn test_inspection_emitted_when_subject() {
        let mut vehicle = test_vehicle();
        vehicle.inspection_valid_until = Some(today() + Duration::days(5));

        let assessments = evaluate_vehicle(&vehicle, &[], &[], today(), &test_config());

        let inspection = find(&assessments, TaskCategory::Inspection).unwrap();
        assert_eq!(inspection.status, DueStatus::DueSoon);
        assert_eq!(inspection.days_remaining, Some(5));
    }

    #[test]
    fn test_date_rule_horizon_boundary_inclusive() {
        let config = test_config();

        // Exactamente en el horizonte: próxima a vencer
        let (status, days) = classify_by_date(today() + Duration::days(30), today(), config.horizon_days);
        assert_eq!(status, DueStatus::DueSoon);
        assert_eq!(days, 30);

        // Un día más allá: en regla
        let (status, _) = classify_by_date(today() + Duration::days(31), today(), config.horizon_days);
        assert_eq!(status, DueStatus::Ok);

        // Hoy mismo: próxima, no vencida
        let (status, days) = classify_by_date(today(), today(), config.horizon_days);
        assert_eq!(status, DueStatus::DueSoon);
        assert_eq!(days, 0);

        // Ayer: vencida
        let (status, days) = classify_by_date(today() - Duration::days(1), today(), config.horizon_days);
        assert_eq!(status, DueStatus::Overdue);
        assert_eq!(days, -1);
    }

    #[test]
    fn test_service_km_due_soon() {
        // Service a los 50.000 con próximo a los 60.000; odómetro 59.600
        let vehicle = test_vehicle();
        let record = service_record(&vehicle, Some(60_000), None);

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        let service = find(&assessments, TaskCategory::Service).unwrap();
        assert_eq!(service.status, DueStatus::DueSoon);
        assert_eq!(service.remaining_km, Some(400));
        assert_eq!(service.due_km, Some(60_000));
    }

    #[test]
    fn test_service_km_overdue() {
        let mut vehicle = test_vehicle();
        vehicle.current_km = 60_100;
        let record = service_record(&vehicle, Some(60_000), None);

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        let service = find(&assessments, TaskCategory::Service).unwrap();
        assert_eq!(service.status, DueStatus::Overdue);
        assert_eq!(service.remaining_km, Some(-100));
    }

    #[test]
    fn test_service_km_exactly_reached_is_overdue() {
        let mut vehicle = test_vehicle();
        vehicle.current_km = 60_000;
        let record = service_record(&vehicle, Some(60_000), None);

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        let service = find(&assessments, TaskCategory::Service).unwrap();
        assert_eq!(service.status, DueStatus::Overdue);
    }

    #[test]
    fn test_service_dual_criteria_km_governs() {
        // km al 80% del umbral restante vs fecha holgada: gobierna el km
        let vehicle = test_vehicle();
        let record = service_record(
            &vehicle,
            Some(60_000),
            Some(today() + Duration::days(25)),
        );

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        let service = find(&assessments, TaskCategory::Service).unwrap();
        // 400/500 = 0.8 < 25/30 = 0.83: el km decide el estado
        assert_eq!(service.status, DueStatus::DueSoon);
        assert!(service.summary.contains("km"));
        // Ambos criterios sobreviven en la evaluación
        assert_eq!(service.due_km, Some(60_000));
        assert_eq!(service.due_date, Some(today() + Duration::days(25)));
        assert_eq!(service.days_remaining, Some(25));
        assert_eq!(service.remaining_km, Some(400));
    }

    #[test]
    fn test_service_dual_criteria_date_governs() {
        let mut vehicle = test_vehicle();
        vehicle.current_km = 55_000;
        // km lejano (5.000 restantes) pero fecha vencida: gobierna la fecha
        let record = service_record(
            &vehicle,
            Some(60_000),
            Some(today() - Duration::days(3)),
        );

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        let service = find(&assessments, TaskCategory::Service).unwrap();
        assert_eq!(service.status, DueStatus::Overdue);
        assert_eq!(service.days_remaining, Some(-3));
    }

    #[test]
    fn test_unknown_obligations_excluded() {
        // Sin fechas, sin service ni neumáticos: nada que evaluar
        let vehicle = test_vehicle();
        let assessments = evaluate_vehicle(&vehicle, &[], &[], today(), &test_config());
        assert!(assessments.is_empty());
    }

    #[test]
    fn test_service_without_next_due_excluded() {
        let vehicle = test_vehicle();
        let record = service_record(&vehicle, None, None);

        let assessments =
            evaluate_vehicle(&vehicle, &[record], &[], today(), &test_config());

        assert!(find(&assessments, TaskCategory::Service).is_none());
    }

    #[test]
    fn test_tire_most_urgent_governs() {
        let vehicle = test_vehicle(); // odómetro 59.600
        let healthy = tire_with_lifetime(&vehicle, "1L", 30_000, 50_000); // quedan 20.400
        let worn = tire_with_lifetime(&vehicle, "2R", 20_000, 40_000); // quedan 400

        let assessments = evaluate_vehicle(
            &vehicle,
            &[],
            &[healthy, worn],
            today(),
            &test_config(),
        );

        let tire = find(&assessments, TaskCategory::TireChange).unwrap();
        assert_eq!(tire.status, DueStatus::DueSoon);
        assert_eq!(tire.remaining_km, Some(400));
        // La posición del neumático más gastado queda en el resumen
        assert!(tire.summary.contains("2R"));
    }

    #[test]
    fn test_tire_without_lifetime_excluded() {
        let vehicle = test_vehicle();
        let tire = Tire::empty(vehicle.account_id, vehicle.id, "1L".to_string(), 0);

        let assessments =
            evaluate_vehicle(&vehicle, &[], &[tire], today(), &test_config());

        assert!(find(&assessments, TaskCategory::TireChange).is_none());
    }

    #[test]
    fn test_exhaust_and_insurance_date_rules() {
        let mut vehicle = test_vehicle();
        vehicle.exhaust_check_due = Some(today() + Duration::days(10));
        vehicle.insurance_valid_until = Some(today() + Duration::days(90));

        let assessments = evaluate_vehicle(&vehicle, &[], &[], today(), &test_config());

        let exhaust = find(&assessments, TaskCategory::ExhaustCheck).unwrap();
        assert_eq!(exhaust.status, DueStatus::DueSoon);

        // Fuera del horizonte: en regla pero igual se informa
        let insurance = find(&assessments, TaskCategory::Insurance).unwrap();
        assert_eq!(insurance.status, DueStatus::Ok);
        assert_eq!(insurance.days_remaining, Some(90));
    }

    #[test]
    fn test_latest_service_record_governs() {
        let vehicle = test_vehicle();
        let mut old = service_record(&vehicle, Some(55_000), None);
        old.performed_on = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let recent = service_record(&vehicle, Some(70_000), None);

        let assessments = evaluate_vehicle(
            &vehicle,
            &[old, recent],
            &[],
            today(),
            &test_config(),
        );

        let service = find(&assessments, TaskCategory::Service).unwrap();
        // Gobierna el registro más reciente aunque el viejo esté vencido
        assert_eq!(service.due_km, Some(70_000));
        assert_eq!(service.status, DueStatus::Ok);
    }
}
