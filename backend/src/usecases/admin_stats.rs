use std::sync::Arc;

use crate::axum_http::error_responses::AppError;
use domain::{
    repositories::{
        daily_stats::DailyStatsRepository, generations::GenerationRepository,
        users::UserRepository,
    },
    value_objects::stats::AdminStatsModel,
};

const RECENT_DAYS: i64 = 30;

pub struct AdminStatsUseCase<U, G, D>
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    generation_repository: Arc<G>,
    daily_stats_repository: Arc<D>,
}

impl<U, G, D> AdminStatsUseCase<U, G, D>
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    D: DailyStatsRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        generation_repository: Arc<G>,
        daily_stats_repository: Arc<D>,
    ) -> Self {
        Self {
            user_repository,
            generation_repository,
            daily_stats_repository,
        }
    }

    pub async fn overview(&self) -> Result<AdminStatsModel, AppError> {
        let total_users = self.user_repository.count_total().await?;
        let paid_users = self.user_repository.count_paid().await?;
        let total_generations = self.generation_repository.count_total().await?;

        let daily = self
            .daily_stats_repository
            .list_recent(RECENT_DAYS)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(AdminStatsModel {
            total_users,
            paid_users,
            total_generations,
            daily,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{
        entities::daily_stats::DailyStatsEntity,
        repositories::{
            daily_stats::MockDailyStatsRepository, generations::MockGenerationRepository,
            users::MockUserRepository,
        },
    };

    #[tokio::test]
    async fn overview_combines_live_counts_and_recent_rows() {
        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_count_total()
            .returning(|| Ok(12));
        user_repository
            .expect_count_paid()
            .returning(|| Ok(3));

        let mut generation_repository = MockGenerationRepository::new();
        generation_repository
            .expect_count_total()
            .returning(|| Ok(40));

        let mut daily_stats_repository = MockDailyStatsRepository::new();
        daily_stats_repository
            .expect_list_recent()
            .returning(|_| {
                Ok(vec![DailyStatsEntity {
                    id: 1,
                    date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
                    total_page_views: 0,
                    total_users: 12,
                    paid_users: 3,
                    total_revenue_minor: 2700,
                }])
            });

        let usecase = AdminStatsUseCase::new(
            Arc::new(user_repository),
            Arc::new(generation_repository),
            Arc::new(daily_stats_repository),
        );

        let overview = usecase.overview().await.unwrap();

        assert_eq!(overview.total_users, 12);
        assert_eq!(overview.paid_users, 3);
        assert_eq!(overview.total_generations, 40);
        assert_eq!(overview.daily.len(), 1);
        assert_eq!(overview.daily[0].total_revenue_minor, 2700);
    }
}
