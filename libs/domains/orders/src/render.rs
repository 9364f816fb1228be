//! Order email rendering.
//!
//! Bodies interpolate with `{{..}}`, so customer, item and vendor names are
//! HTML-escaped. Subjects are plain text and use `{{{..}}}`.

use crate::config::NotifierConfig;
use crate::error::{OrderError, OrderResult};
use crate::models::{
    CURRENCY, Customer, EmailKind, LineItem, Order, OrderSubmission, VendorNotification,
};
use email::{Email, EmailTemplate, RenderedTemplate, TemplateEngine};
use serde::Serialize;
use serde_json::Number;

const ADMIN_TEMPLATE: &str = "order_admin";
const CUSTOMER_TEMPLATE: &str = "order_customer";
const VENDOR_TEMPLATE: &str = "order_vendor";
const ITEMS_PARTIAL: &str = "order_items";

const ITEMS_HTML: &str = r#"{{#each items}}<li><strong>{{quantity}}x</strong> {{name}} ({{currency}} {{price}}) - <em>{{vendor_name}}</em></li>{{/each}}"#;

const ADMIN_SUBJECT: &str = "New Order Alert! #{{{transaction_ref}}}";
const ADMIN_HTML: &str = r#"
<h2>New Order Received</h2>
<p><strong>Ref:</strong> {{transaction_ref}}</p>
<p><strong>Customer:</strong> {{customer_name}} ({{customer_phone}})</p>
<p><strong>Total:</strong> {{currency}} {{total}}</p>
<h3>Items to Fulfill:</h3>
<ul>{{> order_items}}</ul>
"#;

const CUSTOMER_SUBJECT: &str = "Order Confirmation - {{{store_name}}}";
const CUSTOMER_HTML: &str = r#"
<h1>Thank you for your order!</h1>
<p>Hi {{customer_name}},</p>
<p>We have received your payment via Mobile Money.</p>
<p><strong>Order Ref:</strong> {{transaction_ref}}</p>
<h3>Your Basket:</h3>
<ul>{{> order_items}}</ul>
<p><strong>Total Paid:</strong> {{currency}} {{total}}</p>
<hr/>
<p>{{store_name}}</p>
"#;

const VENDOR_SUBJECT: &str = "New Order for {{{vendor_name}}} - #{{{short_id}}}";
const VENDOR_HTML: &str = r#"
<div style="font-family: sans-serif; color: #333;">
    <h2>New Order Received</h2>
    <p>Hello <strong>{{vendor_name}}</strong>,</p>
    <p>You have sold items in a new order from <strong>{{store_name}}</strong>.</p>

    <div style="background: #f9f9f9; padding: 15px; margin: 20px 0;">
    <strong>Customer:</strong> {{customer_name}}<br/>
    <strong>Delivery Method:</strong> {{delivery_method}}
    </div>

    <h3>Items to Prepare:</h3>
    <ul>
    {{#each items}}<li><strong>{{quantity}}x</strong> {{name}}</li>{{/each}}
    </ul>

    <p>Please have these ready for dispatch.</p>
</div>
"#;

#[derive(Serialize)]
struct ItemView<'a> {
    quantity: u32,
    name: &'a str,
    price: &'a Number,
    currency: &'static str,
    vendor_name: &'a str,
}

impl<'a> From<&'a LineItem> for ItemView<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            quantity: item.quantity,
            name: &item.name,
            price: &item.price,
            currency: CURRENCY,
            vendor_name: &item.vendor.name,
        }
    }
}

/// Data shared by the admin alert and the customer receipt
#[derive(Serialize)]
struct OrderView<'a> {
    transaction_ref: &'a str,
    customer_name: &'a str,
    customer_phone: &'a str,
    total: &'a Number,
    currency: &'static str,
    store_name: &'a str,
    items: Vec<ItemView<'a>>,
}

impl<'a> OrderView<'a> {
    fn new(order: &'a Order, customer: &'a Customer, config: &'a NotifierConfig) -> Self {
        Self {
            transaction_ref: &order.transaction_ref,
            customer_name: &customer.name,
            customer_phone: &customer.phone,
            total: &order.total,
            currency: CURRENCY,
            store_name: &config.store_name,
            items: order.items.iter().map(ItemView::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct VendorView<'a> {
    vendor_name: &'a str,
    short_id: &'a str,
    customer_name: &'a str,
    delivery_method: &'a str,
    store_name: &'a str,
    items: Vec<ItemView<'a>>,
}

/// A rendered vendor notice together with the vendor it is addressed to
#[derive(Debug, Clone)]
pub struct VendorEmail {
    pub vendor: VendorNotification,
    pub email: Email,
}

/// Every email one order submission produces
#[derive(Debug, Clone)]
pub struct OrderEmails {
    pub admin: Email,
    pub customer: Email,
    /// One per `vendorNotifications` entry, in submission order
    pub vendors: Vec<VendorEmail>,
}

impl OrderEmails {
    /// Total number of messages, required and vendor
    pub fn message_count(&self) -> usize {
        2 + self.vendors.len()
    }
}

/// Renders order submissions into provider-ready emails.
pub struct OrderEmailRenderer {
    engine: TemplateEngine,
}

impl OrderEmailRenderer {
    pub fn new() -> eyre::Result<Self> {
        let mut engine = TemplateEngine::new();
        engine.register_partial(ITEMS_PARTIAL, ITEMS_HTML)?;
        engine.register(EmailTemplate::html(ADMIN_TEMPLATE, ADMIN_SUBJECT, ADMIN_HTML))?;
        engine.register(EmailTemplate::html(
            CUSTOMER_TEMPLATE,
            CUSTOMER_SUBJECT,
            CUSTOMER_HTML,
        ))?;
        engine.register(EmailTemplate::html(VENDOR_TEMPLATE, VENDOR_SUBJECT, VENDOR_HTML))?;

        Ok(Self { engine })
    }

    /// Render the admin alert, the customer receipt and one notice per vendor entry.
    pub fn render(
        &self,
        submission: &OrderSubmission,
        config: &NotifierConfig,
    ) -> OrderResult<OrderEmails> {
        let view = OrderView::new(&submission.order, &submission.customer, config);

        let admin = self
            .render_template(ADMIN_TEMPLATE, EmailKind::Admin, &view)
            .map(|rendered| {
                build_email(
                    config.business_owner_emails.clone(),
                    rendered,
                    &config.sender_email,
                )
            })?;

        let customer = self
            .render_template(CUSTOMER_TEMPLATE, EmailKind::Customer, &view)
            .map(|rendered| {
                build_email(
                    vec![submission.customer.email.clone()],
                    rendered,
                    &config.sender_email,
                )
            })?;

        let vendors = submission
            .vendors()
            .iter()
            .map(|vendor| self.render_vendor(submission, vendor, config))
            .collect::<OrderResult<Vec<_>>>()?;

        Ok(OrderEmails {
            admin,
            customer,
            vendors,
        })
    }

    fn render_vendor(
        &self,
        submission: &OrderSubmission,
        vendor: &VendorNotification,
        config: &NotifierConfig,
    ) -> OrderResult<VendorEmail> {
        let order = &submission.order;
        let view = VendorView {
            vendor_name: &vendor.name,
            short_id: order.short_id(),
            customer_name: &submission.customer.name,
            delivery_method: &order.delivery_method,
            store_name: &config.store_name,
            items: order
                .items_for_vendor(&vendor.name)
                .map(ItemView::from)
                .collect(),
        };

        let rendered = self.render_template(VENDOR_TEMPLATE, EmailKind::Vendor, &view)?;

        Ok(VendorEmail {
            vendor: vendor.clone(),
            email: build_email(vec![vendor.email.clone()], rendered, &config.sender_email),
        })
    }

    fn render_template<T: Serialize>(
        &self,
        name: &str,
        kind: EmailKind,
        data: &T,
    ) -> OrderResult<RenderedTemplate> {
        self.engine
            .render(name, data)
            .map_err(|e| OrderError::Render {
                kind,
                message: e.to_string(),
            })
    }
}

fn build_email(to: Vec<String>, rendered: RenderedTemplate, sender: &str) -> Email {
    let mut email = Email::to_many(to, rendered.subject).with_from(sender);
    email.body_html = rendered.body_html;
    email.body_text = rendered.body_text;
    email
}
