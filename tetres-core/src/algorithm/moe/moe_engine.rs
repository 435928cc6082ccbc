use super::{moe_ops, MoeKind, MoeParameters, MoeSummary};
use crate::algorithm::discretization::DiscretizedRoute;
use crate::algorithm::imputation::spatial_imputation;
use crate::algorithm::VIRTUAL_NODE_SPACING;
use crate::model::{
    Period, Route, TrafficDataError, TrafficDataReader, TrafficMetricGrid, TrafficVariable,
};
use itertools::Itertools;

impl MoeKind {
    pub fn required_variables(&self) -> &'static [TrafficVariable] {
        match self {
            MoeKind::Vmt => &[TrafficVariable::TotalFlow],
            MoeKind::Vht | MoeKind::Dvh => &[TrafficVariable::TotalFlow, TrafficVariable::Speed],
            MoeKind::Lvmt | MoeKind::Uvmt => {
                &[TrafficVariable::TotalFlow, TrafficVariable::Density]
            }
            MoeKind::Cm | MoeKind::Cmh => &[TrafficVariable::Speed],
        }
    }
}

/// discretized grids feeding the congestion measures of one (route, period).
/// every grid present has one row per virtual node and one column per
/// timestamp.
pub struct MoeInputs {
    pub discretized: DiscretizedRoute,
    pub interval: u32,
    pub flow: Option<TrafficMetricGrid>,
    pub density: Option<TrafficMetricGrid>,
    pub speed: Option<TrafficMetricGrid>,
    pub imputed_speed: Option<TrafficMetricGrid>,
}

impl MoeInputs {
    /// reads only the variables the requested measures depend on.
    pub fn read<R: TrafficDataReader + ?Sized>(
        route: &Route,
        period: &Period,
        reader: &R,
        kinds: &[MoeKind],
    ) -> Result<MoeInputs, TrafficDataError> {
        let discretized = DiscretizedRoute::new(route)?;
        let needs = |v: TrafficVariable| kinds.iter().any(|k| k.required_variables().contains(&v));
        let load = |v: TrafficVariable| -> Result<Option<TrafficMetricGrid>, TrafficDataError> {
            if needs(v) {
                discretized.read(reader, period, v).map(Some)
            } else {
                Ok(None)
            }
        };
        let flow = load(TrafficVariable::TotalFlow)?;
        let density = load(TrafficVariable::Density)?;
        let speed = load(TrafficVariable::Speed)?;
        let imputed_speed = speed.as_ref().map(spatial_imputation);
        let present = [&flow, &density, &speed]
            .into_iter()
            .flatten()
            .collect_vec();
        TrafficMetricGrid::ensure_same_shape(&present)?;
        Ok(MoeInputs {
            discretized,
            interval: period.interval,
            flow,
            density,
            speed,
            imputed_speed,
        })
    }

    fn require<'a>(
        grid: &'a Option<TrafficMetricGrid>,
        variable: TrafficVariable,
    ) -> Result<&'a TrafficMetricGrid, TrafficDataError> {
        grid.as_ref().ok_or_else(|| {
            TrafficDataError::ReadError(format!("{variable} data was not loaded"))
        })
    }

    /// evaluates one measure over every cell
    pub fn grid(
        &self,
        kind: MoeKind,
        params: &MoeParameters,
    ) -> Result<TrafficMetricGrid, TrafficDataError> {
        let hours = self.interval as f64 / 3600.0;
        let spacing = VIRTUAL_NODE_SPACING;
        let nodes = self.discretized.nodes();
        let cells = |grid: &TrafficMetricGrid,
                     f: &dyn Fn(usize, usize, f64) -> f64|
         -> Result<TrafficMetricGrid, TrafficDataError> {
            let rows = grid
                .rows()
                .iter()
                .enumerate()
                .map(|(r, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(t, v)| f(r, t, *v))
                        .collect_vec()
                })
                .collect_vec();
            TrafficMetricGrid::new(rows)
        };

        match kind {
            MoeKind::Vmt => {
                let flow = Self::require(&self.flow, TrafficVariable::TotalFlow)?;
                cells(flow, &|_, _, q| moe_ops::vmt(q, hours, spacing))
            }
            MoeKind::Vht => {
                let flow = Self::require(&self.flow, TrafficVariable::TotalFlow)?;
                let speed = Self::require(&self.speed, TrafficVariable::Speed)?;
                cells(flow, &|r, t, q| {
                    moe_ops::vht(q, speed.value(r, t), hours, spacing)
                })
            }
            MoeKind::Lvmt | MoeKind::Uvmt => {
                let flow = Self::require(&self.flow, TrafficVariable::TotalFlow)?;
                let density = Self::require(&self.density, TrafficVariable::Density)?;
                let formula = if kind == MoeKind::Lvmt {
                    moe_ops::lvmt
                } else {
                    moe_ops::uvmt
                };
                cells(flow, &|r, t, q| {
                    formula(
                        q,
                        density.value(r, t),
                        nodes[r].lanes,
                        params.critical_density,
                        params.lane_capacity,
                        hours,
                        spacing,
                    )
                })
            }
            MoeKind::Dvh => {
                let flow = Self::require(&self.flow, TrafficVariable::TotalFlow)?;
                let speed = Self::require(&self.speed, TrafficVariable::Speed)?;
                cells(flow, &|r, t, q| {
                    moe_ops::dvh(q, speed.value(r, t), nodes[r].speed_limit, hours, spacing)
                })
            }
            MoeKind::Cm | MoeKind::Cmh => {
                let speed = Self::require(&self.imputed_speed, TrafficVariable::Speed)?;
                let last = speed.n_rows().saturating_sub(1);
                let threshold = params.congestion_threshold_speed;
                cells(speed, &|r, _, u| {
                    // the last node has no segment downstream of it
                    if r == last {
                        0.0
                    } else if kind == MoeKind::Cm {
                        moe_ops::cm(u, threshold, spacing)
                    } else {
                        moe_ops::cmh(u, threshold, hours, spacing)
                    }
                })
            }
        }
    }
}

/// evaluates one congestion measure for every virtual node and timestamp.
pub fn compute_moe<R: TrafficDataReader + ?Sized>(
    kind: MoeKind,
    route: &Route,
    period: &Period,
    reader: &R,
    params: &MoeParameters,
) -> Result<TrafficMetricGrid, TrafficDataError> {
    let inputs = MoeInputs::read(route, period, reader, &[kind])?;
    inputs.grid(kind, params)
}

/// route level totals of every measure, one summary per timestamp.
pub fn compute_moe_summaries<R: TrafficDataReader + ?Sized>(
    route: &Route,
    period: &Period,
    reader: &R,
    params: &MoeParameters,
) -> Result<Vec<MoeSummary>, TrafficDataError> {
    let inputs = MoeInputs::read(route, period, reader, &MoeKind::ALL)?;
    let sums = |kind: MoeKind| -> Result<Vec<f64>, TrafficDataError> {
        Ok(inputs.grid(kind, params)?.column_sums())
    };
    let vmt = sums(MoeKind::Vmt)?;
    let vht = sums(MoeKind::Vht)?;
    let lvmt = sums(MoeKind::Lvmt)?;
    let uvmt = sums(MoeKind::Uvmt)?;
    let dvh = sums(MoeKind::Dvh)?;
    let cm = sums(MoeKind::Cm)?;
    let cmh = sums(MoeKind::Cmh)?;
    let summaries = (0..period.len())
        .map(|t| MoeSummary {
            vmt: vmt.get(t).copied().unwrap_or_default(),
            vht: vht.get(t).copied().unwrap_or_default(),
            lvmt: lvmt.get(t).copied().unwrap_or_default(),
            uvmt: uvmt.get(t).copied().unwrap_or_default(),
            dvh: dvh.get(t).copied().unwrap_or_default(),
            cm: cm.get(t).copied().unwrap_or_default(),
            cmh: cmh.get(t).copied().unwrap_or_default(),
        })
        .collect_vec();
    Ok(summaries)
}
