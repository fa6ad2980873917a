//! Qualification pipeline: concurrent signal fan-out feeding the
//! aggregation engine and the decision dispatcher.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::models::{
    AggregationResult, FollowUpOutcome, LeadFields, SignalBundle, SignalReport, SignalType,
};
use crate::domain::ports::EvaluatorClient;
use crate::services::{AggregationEngine, DecisionDispatcher};

/// What a qualification request returns to its caller: the immutable
/// aggregation result plus the follow-up outcome the dispatcher observed.
#[derive(Debug, Clone)]
pub struct QualificationOutcome {
    pub result: AggregationResult,
    pub followup: FollowUpOutcome,
}

/// Drives one qualification request end to end.
///
/// The five evaluator calls run concurrently under a shared timeout budget
/// and settle behind a join barrier; any leg that fails, times out or
/// panics is substituted with the neutral default report, so partial
/// evaluator failure degrades confidence instead of failing the request.
/// Holds no mutable state across requests; every request owns its bundle.
pub struct QualificationPipeline {
    evaluators: Arc<dyn EvaluatorClient>,
    engine: AggregationEngine,
    dispatcher: Arc<DecisionDispatcher>,
    batch_timeout: Duration,
}

impl QualificationPipeline {
    pub fn new(
        evaluators: Arc<dyn EvaluatorClient>,
        dispatcher: Arc<DecisionDispatcher>,
        batch_timeout: Duration,
    ) -> Self {
        Self {
            evaluators,
            engine: AggregationEngine::new(),
            dispatcher,
            batch_timeout,
        }
    }

    /// Collect signals, aggregate, then dispatch the decision.
    ///
    /// Only dispatch (persistence) can fail here; evaluator trouble never
    /// propagates, and the engine is infallible by construction.
    #[instrument(skip(self, fields), fields(lead_id = fields.lead_id))]
    pub async fn qualify(&self, fields: &LeadFields) -> Result<QualificationOutcome> {
        let bundle = self.collect_signals(fields).await;
        let result = self.engine.aggregate(&bundle);
        debug!(
            decision = %result.decision,
            score = result.total_score,
            confidence = result.confidence,
            "aggregation complete"
        );

        let followup = self
            .dispatcher
            .dispatch(fields, &bundle, &result)
            .await
            .context("failed to dispatch qualification decision")?;

        Ok(QualificationOutcome { result, followup })
    }

    /// Fan out one evaluator call per signal type and assemble the bundle.
    ///
    /// Always returns a complete bundle: every leg settles as either a real
    /// report or the neutral default before the barrier releases.
    pub async fn collect_signals(&self, fields: &LeadFields) -> SignalBundle {
        let handles = SignalType::ALL.map(|signal| {
            let client = Arc::clone(&self.evaluators);
            let value = raw_field(fields, signal);
            let budget = self.batch_timeout;

            tokio::spawn(async move {
                match tokio::time::timeout(budget, client.evaluate(signal, value.as_deref())).await
                {
                    Ok(Ok(report)) => report,
                    Ok(Err(err)) => {
                        warn!(signal = %signal, error = %err, "evaluator failed, using neutral report");
                        SignalReport::neutral()
                    }
                    Err(_) => {
                        warn!(
                            signal = %signal,
                            budget_secs = budget.as_secs(),
                            "evaluator exceeded batch budget, using neutral report"
                        );
                        SignalReport::neutral()
                    }
                }
            })
        });

        // Join barrier: wait for all five legs to settle before assembly.
        let settled = join_all(handles).await;

        let mut bundle = SignalBundle::neutral(fields.lead_id);
        for (signal, joined) in SignalType::ALL.into_iter().zip(settled) {
            let report = match joined {
                Ok(report) => report,
                Err(err) => {
                    warn!(signal = %signal, error = %err, "evaluator task aborted, using neutral report");
                    SignalReport::neutral()
                }
            };
            bundle.set_report(signal, report);
        }
        bundle
    }
}

/// The raw lead field an evaluator of the given signal type consumes.
fn raw_field(fields: &LeadFields, signal: SignalType) -> Option<String> {
    match signal {
        SignalType::Email => fields.email.clone(),
        SignalType::Phone => fields.phone.clone(),
        SignalType::Name => fields.name.clone(),
        SignalType::Company => fields.company.clone(),
        SignalType::Message => fields.message.clone(),
    }
}
