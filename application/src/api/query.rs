//! GraphQL [`Query`]s definitions.

use common::Money;
use juniper::graphql_object;
use service::{
    query::{self, cluster, listing},
    Query as _,
};
use tracing as log;

use crate::{
    api::{recommend, region, scalar, signal},
    Context, Error,
};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Recommends the stored `Listing`s of the preferred regions best
    /// matching the provided profile.
    ///
    /// An unreadable listing store results in an empty degraded
    /// recommendation. Weights outside `1..=5` range are clamped into it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recommend",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn recommend(
        profile: recommend::ProfileInput,
        ctx: &Context,
    ) -> recommend::Recommendation {
        let profile = profile.into_profile();
        let (candidates, store_failed) =
            match ctx.service().execute(listing::All::by(())).await {
                Ok(listings) => (listings, false),
                Err(e) => {
                    log::warn!("failed to load candidate listings: {e}");
                    (Vec::new(), true)
                }
            };

        let mut out = ctx
            .service()
            .execute(query::Recommend {
                profile,
                candidates,
            })
            .await
            .unwrap_or_else(|e| match e {});
        out.degraded |= store_failed;
        out.into()
    }

    /// Estimates monthly revenue and break-even point of a business.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_AREA` - the area is not positive;
    /// - `INVALID_COGS_RATE` - the cost of goods sold rate is not finite.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "simulate",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn simulate(
        input: Option<recommend::SimulationInput>,
        ctx: &Context,
    ) -> Result<recommend::Simulation, Error> {
        let query = input
            .unwrap_or_default()
            .into_query()
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(query)
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Compares market indices of two regions by their names.
    #[tracing::instrument(
        skip_all,
        fields(
            a = %a,
            b = %b,
            gql.name = "compareRegions",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn compare_regions(
        a: scalar::RegionName,
        b: scalar::RegionName,
        ctx: &Context,
    ) -> recommend::Comparison {
        ctx.service()
            .execute(query::Compare {
                a: a.into(),
                b: b.into(),
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into()
    }

    /// Measures the competition signal around the provided point.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_COORDINATE` - the point is out of range;
    /// - `INVALID_RADIUS` - the radius is not positive;
    /// - `INVALID_AREA` - the area is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "competitionSignal",
            otel.name = Self::SPAN_NAME,
            radius = ?radius,
        ),
    )]
    pub async fn competition_signal(
        at: signal::CoordinateInput,
        keywords: Option<Vec<scalar::Keyword>>,
        radius: Option<i32>,
        region: Option<scalar::RegionName>,
        rent: Option<Money>,
        area: Option<f64>,
        ctx: &Context,
    ) -> Result<signal::CompetitionSignal, Error> {
        let center = at.into_coordinate().map_err(ctx.error())?;
        let radius = radius
            .map(signal::radius)
            .transpose()
            .map_err(ctx.error())?;
        let area = area
            .map(recommend::area)
            .transpose()
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(query::Competition {
                center: Some(center),
                keywords: keywords
                    .filter(|k| !k.is_empty())
                    .map(|k| k.into_iter().map(Into::into).collect()),
                radius,
                region: region.map(Into::into),
                rent,
                area,
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Measures distance-decayed density indices around the provided point.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_COORDINATE` - the point is out of range;
    /// - `INVALID_RADIUS` - the radius is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "densityIndex",
            otel.name = Self::SPAN_NAME,
            radius = ?radius,
        ),
    )]
    pub async fn density_index(
        at: signal::CoordinateInput,
        radius: Option<i32>,
        ctx: &Context,
    ) -> Result<signal::DensityIndex, Error> {
        let center = at.into_coordinate().map_err(ctx.error())?;
        let radius = radius
            .map(signal::radius)
            .transpose()
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(query::Density { center, radius })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }

    /// Clusters the stored `Listing`s within the provided viewport (or the
    /// whole service area) by their districts.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_COORDINATE` - some corner is out of range;
    /// - `INVALID_BOUNDING_BOX` - the corners are swapped.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "districtClusters",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn district_clusters(
        viewport: Option<region::BoundingBoxInput>,
        filter: Option<region::ListingFilterInput>,
        ctx: &Context,
    ) -> Result<Vec<region::Cluster>, Error> {
        let viewport = viewport
            .map(region::BoundingBoxInput::into_bounding_box)
            .transpose()
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(cluster::Districts {
                viewport,
                filter: filter.unwrap_or_default().into(),
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Clusters the stored `Listing`s of the provided district by their
    /// sub-districts.
    #[tracing::instrument(
        skip_all,
        fields(
            district = %district,
            gql.name = "subdistrictClusters",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn subdistrict_clusters(
        district: scalar::RegionCode,
        filter: Option<region::ListingFilterInput>,
        ctx: &Context,
    ) -> Vec<region::Cluster> {
        ctx.service()
            .execute(cluster::Subdistricts {
                district: district.into(),
                filter: filter.unwrap_or_default().into(),
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Breaks the provided sub-district down by nearby place categories.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_COORDINATE` - the centroid is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "categoryBreakdown",
            otel.name = Self::SPAN_NAME,
            subdistrict = %subdistrict,
        ),
    )]
    pub async fn category_breakdown(
        subdistrict: scalar::RegionCode,
        centroid: Option<signal::CoordinateInput>,
        ctx: &Context,
    ) -> Result<region::Breakdown, Error> {
        let centroid = centroid
            .map(signal::CoordinateInput::into_coordinate)
            .transpose()
            .map_err(ctx.error())?;

        Ok(ctx
            .service()
            .execute(cluster::Categories {
                subdistrict: subdistrict.into(),
                centroid,
            })
            .await
            .unwrap_or_else(|e| match e {})
            .into())
    }
}

#[cfg(test)]
mod spec {
    use juniper::{
        graphql_value, DefaultScalarValue, ExecutionError, Value, Variables,
    };
    use service::infra::{kakao, naver, Fallback, JsonFile, Kakao, Naver};

    use crate::{api, Context, Service};

    /// Creates a [`Context`] over an empty store and unconfigured providers.
    fn context() -> Context {
        let kakao = Kakao::new(kakao::Config::default()).unwrap();
        let naver = Naver::new(naver::Config::default()).unwrap();
        Context::new(Service::new(
            service::Config::default(),
            JsonFile::new("does-not-exist/listings.json"),
            kakao.clone(),
            Fallback::new(kakao, naver),
        ))
    }

    async fn execute(
        doc: &str,
        ctx: &Context,
    ) -> (Value, Vec<ExecutionError<DefaultScalarValue>>) {
        let schema = api::Schema::new(
            api::Query,
            api::Mutation::new(),
            api::Subscription::new(),
        );
        juniper::execute(doc, None, &schema, &Variables::new(), ctx)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn simulates_with_defaults() {
        let ctx = context();

        let (res, errs) = execute(
            "{ simulate { footTraffic estimatedSales bepSales \
                          recommendedCategory } }",
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"simulate": {
                "footTraffic": 55,
                "estimatedSales": "1900MANWON",
                "bepSales": "1429MANWON",
                "recommendedCategory": "카페",
            }}),
        );
    }

    #[tokio::test]
    async fn compares_unknown_regions_synthetically() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{ compareRegions(a: "부춘동", b: "해미읍") {
                a { basis rentIndex competition }
                degraded
            } }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"compareRegions": {
                "a": {"basis": "SYNTHETIC", "rentIndex": 72, "competition": 39},
                "degraded": false,
            }}),
        );
    }

    #[tokio::test]
    async fn empty_clusters_for_empty_store() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{ districtClusters { code count }
                 subdistrictClusters(district: "44210") { code } }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"districtClusters": [], "subdistrictClusters": []}),
        );
    }

    #[tokio::test]
    async fn recommends_nothing_for_empty_store() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{ recommend(profile: {preferredRegions: ["부춘동"]}) {
                listings { score }
                categories
                degraded
            } }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"recommend": {
                "listings": [],
                "categories": ["카페", "분식", "치킨"],
                "degraded": false,
            }}),
        );
    }

    #[tokio::test]
    async fn degrades_signal_without_credential() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{ competitionSignal(
                at: {lat: 36.78, lng: 126.45},
                keywords: ["치킨"],
            ) {
                total
                competition
                degraded
            } }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            res,
            graphql_value!({"competitionSignal": {
                "total": 0,
                "competition": 85,
                "degraded": true,
            }}),
        );
    }

    #[tokio::test]
    async fn clamps_out_of_range_weight() {
        let ctx = context();

        let (res, errs) = execute(
            r#"{ recommend(profile: {
                preferredRegions: ["부춘동"],
                weights: {footTraffic: 9, youthPreference: -2},
            }) { degraded } }"#,
            &ctx,
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(res, graphql_value!({"recommend": {"degraded": false}}));
    }

    #[tokio::test]
    async fn rejects_swapped_viewport() {
        let ctx = context();

        let (_, errs) = execute(
            "{ districtClusters(viewport: {
                sw: {lat: 36.94, lng: 126.64},
                ne: {lat: 36.62, lng: 126.26},
            }) { code } }",
            &ctx,
        )
        .await;

        assert_eq!(errs.len(), 1);
        assert_eq!(
            errs[0].error().message(),
            "South-west corner must not exceed the north-east one",
        );
    }
}
