//! Reporting service for monthly reports and dashboard metrics
//!
//! Section assembly lives in `shared::reports` so it stays testable without
//! a database; this service fetches the month's rows, assembles the report,
//! and renders it as CSV for download.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::banana_sale::BananaSaleService;
use crate::services::cacao_sale::CacaoSaleService;
use crate::services::fertilizer::FertilizerService;
use crate::services::wrapping::WrappingService;
use shared::reports::{
    build_banana_sale_section, build_cacao_section, build_fertilizer_section,
    build_wrapping_section, month_range, MonthlyReport,
};
use shared::types::capitalize;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// One point of the combined monthly sales series
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MonthlySalesPoint {
    pub period: String,
    pub total: Decimal,
}

/// Sales split by product line
#[derive(Debug, Serialize)]
pub struct ProductSales {
    pub product: String,
    pub value: Decimal,
}

/// Dashboard metrics
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    /// Bunches wrapped and still available
    pub available_wrapped_quantity: i64,
    pub total_cacao_sales_value: Decimal,
    pub total_banana_sales_value: Decimal,
    /// Combined sales per month, last six months
    pub monthly_sales: Vec<MonthlySalesPoint>,
    pub sales_by_product: Vec<ProductSales>,
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the monthly report from the four collections
    pub async fn monthly_report(&self, year: i32, month: u32) -> AppResult<MonthlyReport> {
        let (start, end) = month_range(year, month).ok_or_else(|| AppError::Validation {
            field: "month".to_string(),
            message: "Month must be between 1 and 12".to_string(),
            message_es: "El mes debe estar entre 1 y 12".to_string(),
        })?;

        let wrappings = WrappingService::new(self.db.clone())
            .list_between(start, end)
            .await?;
        let cacao_sales = CacaoSaleService::new(self.db.clone())
            .list_between(start, end)
            .await?;
        let banana_sales = BananaSaleService::new(self.db.clone())
            .list_between(start, end)
            .await?;
        let fertilizers = FertilizerService::new(self.db.clone())
            .list_between(start, end)
            .await?;

        Ok(MonthlyReport {
            year,
            month,
            wrappings: build_wrapping_section(wrappings),
            cacao_sales: build_cacao_section(cacao_sales),
            banana_sales: build_banana_sale_section(banana_sales),
            fertilizers: build_fertilizer_section(fertilizers),
        })
    }

    /// Render a monthly report as CSV, one titled block per non-empty
    /// section with a trailing totals row
    pub fn monthly_report_csv(report: &MonthlyReport) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

        let write_err =
            |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        wtr.write_record([format!(
            "Reporte de Registros - {}-{:02}",
            report.year, report.month
        )])
        .map_err(write_err)?;

        if !report.wrappings.records.is_empty() {
            wtr.write_record(["Enfundados de Plátano"])
                .map_err(write_err)?;
            wtr.write_record(["Fecha", "Color Cinta", "Cantidad", "Estado"])
                .map_err(write_err)?;
            for w in &report.wrappings.records {
                let estado = if w.available { "Disponible" } else { "Vendido" };
                wtr.write_record([
                    format_date(&w.record_date),
                    capitalize(&w.tape_color),
                    w.quantity.to_string(),
                    estado.to_string(),
                ])
                .map_err(write_err)?;
            }
            wtr.write_record([
                "Total".to_string(),
                String::new(),
                report.wrappings.total_quantity.to_string(),
                String::new(),
            ])
            .map_err(write_err)?;
        }

        if !report.cacao_sales.records.is_empty() {
            wtr.write_record(["Ventas de Cacao"]).map_err(write_err)?;
            wtr.write_record(["Fecha", "Cantidad (kg)", "Valor Unitario", "Valor Total"])
                .map_err(write_err)?;
            for s in &report.cacao_sales.records {
                wtr.write_record([
                    format_date(&s.record_date),
                    s.quantity.to_string(),
                    s.unit_price.to_string(),
                    s.total_value.to_string(),
                ])
                .map_err(write_err)?;
            }
            wtr.write_record([
                "Total".to_string(),
                report.cacao_sales.total_quantity_kg.to_string(),
                String::new(),
                report.cacao_sales.total_value.to_string(),
            ])
            .map_err(write_err)?;
        }

        if !report.banana_sales.records.is_empty() {
            wtr.write_record(["Ventas de Plátano"]).map_err(write_err)?;
            wtr.write_record(["Fecha", "Colores Cinta", "Cantidad (cajas)", "Precio Total"])
                .map_err(write_err)?;
            for s in &report.banana_sales.records {
                let colors = s
                    .tape_colors
                    .iter()
                    .map(|c| capitalize(c))
                    .collect::<Vec<_>>()
                    .join(", ");
                wtr.write_record([
                    format_date(&s.record_date),
                    colors,
                    s.quantity.to_string(),
                    s.total_price.to_string(),
                ])
                .map_err(write_err)?;
            }
            wtr.write_record([
                "Total".to_string(),
                String::new(),
                report.banana_sales.total_boxes.to_string(),
                report.banana_sales.total_price.to_string(),
            ])
            .map_err(write_err)?;
        }

        if !report.fertilizers.records.is_empty() {
            wtr.write_record(["Aplicaciones de Fertilizante"])
                .map_err(write_err)?;
            wtr.write_record(["Fecha", "Tipo", "Cantidad", "Notas"])
                .map_err(write_err)?;
            for f in &report.fertilizers.records {
                wtr.write_record([
                    format_date(&f.record_date),
                    f.fertilizer_type.clone(),
                    f.quantity.to_string(),
                    f.notes.clone().unwrap_or_default(),
                ])
                .map_err(write_err)?;
            }
            wtr.write_record([
                "Total".to_string(),
                String::new(),
                report.fertilizers.total_quantity.to_string(),
                String::new(),
            ])
            .map_err(write_err)?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Get dashboard metrics
    pub async fn dashboard_metrics(&self) -> AppResult<DashboardMetrics> {
        // Bunches still available
        let available_wrapped_quantity: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM banana_wrappings WHERE available",
        )
        .fetch_one(&self.db)
        .await?;

        let total_cacao_sales_value: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_value), 0) FROM cacao_sales")
                .fetch_one(&self.db)
                .await?;

        let total_banana_sales_value: Decimal =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_price), 0) FROM banana_sales")
                .fetch_one(&self.db)
                .await?;

        // Combined sales series, last six months
        let monthly_sales = sqlx::query_as::<_, MonthlySalesPoint>(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('month', record_date), 'YYYY-MM') as period,
                   SUM(total) as total
            FROM (
                SELECT record_date, total_price as total FROM banana_sales
                UNION ALL
                SELECT record_date, total_value as total FROM cacao_sales
            ) sales
            WHERE record_date >= DATE_TRUNC('month', CURRENT_DATE) - INTERVAL '5 months'
            GROUP BY DATE_TRUNC('month', record_date)
            ORDER BY period ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let sales_by_product = vec![
            ProductSales {
                product: "Cacao".to_string(),
                value: total_cacao_sales_value,
            },
            ProductSales {
                product: "Plátano".to_string(),
                value: total_banana_sales_value,
            },
        ];

        Ok(DashboardMetrics {
            available_wrapped_quantity,
            total_cacao_sales_value,
            total_banana_sales_value,
            monthly_sales,
            sales_by_product,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shared::models::{BananaWrapping, CacaoSale};
    use shared::reports::{
        build_banana_sale_section, build_cacao_section, build_fertilizer_section,
        build_wrapping_section,
    };
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn empty_report() -> MonthlyReport {
        MonthlyReport {
            year: 2024,
            month: 6,
            wrappings: build_wrapping_section(vec![]),
            cacao_sales: build_cacao_section(vec![]),
            banana_sales: build_banana_sale_section(vec![]),
            fertilizers: build_fertilizer_section(vec![]),
        }
    }

    #[test]
    fn csv_of_empty_month_has_only_the_title() {
        let csv = ReportingService::monthly_report_csv(&empty_report()).unwrap();
        assert_eq!(csv.trim(), "Reporte de Registros - 2024-06");
    }

    #[test]
    fn csv_sections_carry_rows_and_totals() {
        let date = chrono::Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let mut report = empty_report();
        report.wrappings = build_wrapping_section(vec![BananaWrapping {
            id: Uuid::new_v4(),
            record_date: date,
            tape_color: "rojo".to_string(),
            quantity: 120,
            observation: String::new(),
            available: true,
            created_at: date,
        }]);
        report.cacao_sales = build_cacao_section(vec![CacaoSale {
            id: Uuid::new_v4(),
            record_date: date,
            quantity: dec("50"),
            unit_price: dec("2.5"),
            total_value: dec("125.0"),
            description: "quintal".to_string(),
            created_at: date,
        }]);

        let csv = ReportingService::monthly_report_csv(&report).unwrap();
        assert!(csv.contains("Enfundados de Plátano"));
        assert!(csv.contains("15/06/2024,Rojo,120,Disponible"));
        assert!(csv.contains("Total,,120,"));
        assert!(csv.contains("Ventas de Cacao"));
        assert!(csv.contains("125.0"));
        // Empty sections are omitted entirely
        assert!(!csv.contains("Ventas de Plátano"));
        assert!(!csv.contains("Aplicaciones de Fertilizante"));
    }
}
