use super::{internal, Service};
use crate::contract::{
    CommerceError, OrderStatus, Payment, PaymentFilter, PaymentInit, PaymentRequest,
    PaymentStatus,
};
use crate::domain::events::CommerceEvent;
use crate::domain::gateway::{ChargeRequest, GatewayError, PaymentGateway};
use crate::domain::reference::generate_reference;
use crate::domain::validation::validate_payment;
use chrono::Utc;
use idgm_kit::{Page, PageRequest, Principal};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Fresh references tried before giving up on a collision streak
const REFERENCE_ATTEMPTS: usize = 3;

impl Service {
    /// Open a hosted checkout with the requested provider
    ///
    /// Nothing is written and no provider is called until the payload passes
    /// validation. Once the payment row exists, any provider failure marks it
    /// FAILED before the error is returned.
    pub async fn initialize_payment(
        &self,
        principal: &Principal,
        req: PaymentRequest,
    ) -> Result<PaymentInit, CommerceError> {
        let valid = validate_payment(&req, &self.settings.default_currency)
            .map_err(|errors| CommerceError::Validation { errors })?;

        let mut amount = valid.amount;
        if let Some(order_id) = valid.order_id {
            let order = self.get_user_order(principal.user_id, order_id).await?;
            if order.status != OrderStatus::Pending {
                return Err(CommerceError::conflict(format!(
                    "Order {} is {} and cannot be paid",
                    order_id, order.status
                )));
            }
            amount = order.total;
        }

        let reference = self.unused_reference().await?;
        let now = Utc::now();
        let mut payment = Payment {
            id: Uuid::new_v4(),
            order_id: valid.order_id,
            user_id: principal.user_id,
            provider: valid.provider,
            reference,
            provider_reference: None,
            email: valid.email,
            amount,
            currency: valid.currency,
            status: PaymentStatus::Initiated,
            metadata: json!({
                "shipping": req.shipping.unwrap_or(Value::Null),
                "items": req.items.unwrap_or(Value::Null),
            }),
            created_at: now,
            updated_at: now,
        };
        self.repos
            .payments
            .create(&payment)
            .await
            .map_err(internal)?;

        let charge = ChargeRequest {
            reference: payment.reference.clone(),
            email: payment.email.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            callback_url: valid.callback_url,
            metadata: json!({
                "paymentId": payment.id,
                "orderId": payment.order_id,
                "userId": payment.user_id,
            }),
        };

        let outcome = match self.gateway(&payment) {
            Ok(gateway) => gateway.initialize(&charge).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(session) => {
                payment.provider_reference = session.provider_reference;
                set_metadata(&mut payment.metadata, "provider", session.raw);
                payment.updated_at = Utc::now();
                self.repos
                    .payments
                    .update(&payment)
                    .await
                    .map_err(internal)?;

                tracing::info!(
                    payment_id = %payment.id,
                    reference = %payment.reference,
                    provider = %payment.provider,
                    amount = %payment.amount,
                    "Payment initialized"
                );
                Ok(PaymentInit {
                    payment,
                    authorization_url: session.authorization_url,
                })
            }
            Err(error) => Err(self.fail_payment(payment, error).await),
        }
    }

    /// Ask the provider how a payment ended and record the outcome
    ///
    /// Payments already SUCCESS or FAILED are returned as stored.
    pub async fn verify_payment(
        &self,
        principal: &Principal,
        reference: &str,
    ) -> Result<Payment, CommerceError> {
        let mut payment = self
            .repos
            .payments
            .find_by_reference(reference)
            .await
            .map_err(internal)?
            .filter(|p| p.user_id == principal.user_id || principal.is_admin())
            .ok_or_else(|| CommerceError::not_found("Payment", reference))?;

        if payment.status.is_final() {
            return Ok(payment);
        }

        let verification = self
            .gateway(&payment)
            .map_err(|e| gateway_failure(&payment, e))?
            .verify(&payment.reference)
            .await
            .map_err(|e| gateway_failure(&payment, e))?;

        payment.status = if verification.succeeded {
            PaymentStatus::Success
        } else {
            PaymentStatus::Failed
        };
        set_metadata(&mut payment.metadata, "verification", verification.raw);
        payment.updated_at = Utc::now();
        self.repos
            .payments
            .update(&payment)
            .await
            .map_err(internal)?;

        tracing::info!(
            payment_id = %payment.id,
            reference = %payment.reference,
            status = %payment.status,
            "Payment verified"
        );

        if payment.status == PaymentStatus::Success {
            if let Some(order_id) = payment.order_id {
                self.mark_order_paid(order_id).await?;
            }
        }
        self.publish(CommerceEvent::payment_completed(&payment)).await;

        Ok(payment)
    }

    pub async fn list_payments(
        &self,
        filter: &PaymentFilter,
        page: PageRequest,
    ) -> Result<Page<Payment>, CommerceError> {
        let (items, total) = self
            .repos
            .payments
            .list(filter, page)
            .await
            .map_err(internal)?;
        Ok(Page::new(items, total, page))
    }

    // ===== Helper Methods =====

    fn gateway(&self, payment: &Payment) -> Result<Arc<dyn PaymentGateway>, GatewayError> {
        self.gateways
            .get(&payment.provider)
            .cloned()
            .ok_or(GatewayError::MissingSecretKey)
    }

    async fn unused_reference(&self) -> Result<String, CommerceError> {
        for _ in 0..REFERENCE_ATTEMPTS {
            let reference = generate_reference(Utc::now());
            let taken = self
                .repos
                .payments
                .find_by_reference(&reference)
                .await
                .map_err(internal)?
                .is_some();
            if !taken {
                return Ok(reference);
            }
            tracing::warn!(reference = %reference, "Payment reference collision, regenerating");
        }
        tracing::error!("Could not generate an unused payment reference");
        Err(CommerceError::Internal)
    }

    /// Record the failure on the payment and translate it for the caller
    async fn fail_payment(&self, mut payment: Payment, error: GatewayError) -> CommerceError {
        payment.status = PaymentStatus::Failed;
        set_metadata(&mut payment.metadata, "error", json!(error.to_string()));
        payment.updated_at = Utc::now();
        if let Err(e) = self.repos.payments.update(&payment).await {
            tracing::error!(payment_id = %payment.id, error = ?e, "Failed to mark payment FAILED");
        }
        gateway_failure(&payment, error)
    }

    /// PENDING orders move to PAID; any other status is left alone
    async fn mark_order_paid(&self, order_id: Uuid) -> Result<(), CommerceError> {
        let Some(order) = self.get_order(order_id).await? else {
            tracing::warn!(order_id = %order_id, "Paid payment references a missing order");
            return Ok(());
        };
        if order.status != OrderStatus::Pending {
            tracing::info!(order_id = %order_id, status = %order.status, "Order not pending, leaving status as is");
            return Ok(());
        }

        let applied = self
            .repos
            .orders
            .transition(order_id, OrderStatus::Pending, OrderStatus::Paid, false, Utc::now())
            .await
            .map_err(internal)?;
        if applied {
            tracing::info!(order_id = %order_id, "Order marked PAID after payment");
        }
        Ok(())
    }
}

fn gateway_failure(payment: &Payment, error: GatewayError) -> CommerceError {
    match error {
        GatewayError::MissingSecretKey => {
            tracing::error!(provider = %payment.provider, "Payment provider secret key is not configured");
            CommerceError::Configuration {
                reason: format!("{} secret key is not configured", payment.provider),
            }
        }
        other => {
            tracing::error!(
                provider = %payment.provider,
                reference = %payment.reference,
                error = %other,
                "Payment provider call failed"
            );
            CommerceError::Provider {
                provider: payment.provider,
                message: other.to_string(),
            }
        }
    }
}

fn set_metadata(metadata: &mut Value, key: &str, value: Value) {
    if !metadata.is_object() {
        *metadata = json!({});
    }
    if let Some(map) = metadata.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}
