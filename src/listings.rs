//! TinyHouse listings operations.
//!
//! Typed payloads and the two canonical operations of the listings page:
//! fetching every listing and deleting one by id.
//!
//! # Example
//!
//! ```rust,ignore
//! use tinyhouse_client::listings;
//!
//! let transport = HttpTransport::shared(&config);
//! let page = listings::ListingsPage::new(transport);
//!
//! let state = page.listings().settled().await;
//! page.delete_listing("5f0efa8f93364a3850189d54").await?;
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graphql::{MutationController, Operation, OperationError, QueryController, Transport};

/// Query for every listing.
pub const LISTINGS: &str = "
    query Listings {
        listings {
            id
            title
            image
            address
            price
            numOfGuests
            numOfBeds
            numOfBaths
            rating
        }
    }
";

/// Mutation deleting a listing by id.
pub const DELETE_LISTING: &str = "
    mutation DeleteListing($id: ID!) {
        deleteListing(id: $id) {
            id
        }
    }
";

/// A rental listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing ID.
    pub id: String,
    /// Headline shown on the listing card.
    pub title: String,
    /// URL of the listing photo.
    pub image: String,
    /// Street address of the property.
    pub address: String,
    /// Nightly price in cents.
    pub price: i32,
    /// Maximum number of guests.
    pub num_of_guests: i32,
    /// Number of beds.
    pub num_of_beds: i32,
    /// Number of bathrooms.
    pub num_of_baths: i32,
    /// Average guest rating.
    pub rating: f64,
}

/// Payload of [`LISTINGS`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingsData {
    /// Every listing known to the endpoint.
    pub listings: Vec<Listing>,
}

/// The fields [`DELETE_LISTING`] selects from the removed listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedListing {
    /// ID of the removed listing.
    pub id: String,
}

/// Payload of [`DELETE_LISTING`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteListingData {
    /// The listing that was removed.
    pub delete_listing: DeletedListing,
}

/// Variables of [`DELETE_LISTING`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteListingVariables {
    /// ID of the listing to delete.
    pub id: String,
}

/// Returns the [`LISTINGS`] operation.
#[must_use]
pub fn listings_query() -> Operation {
    Operation::new(LISTINGS)
}

/// Returns a [`DELETE_LISTING`] controller; nothing is sent until it is executed.
#[must_use]
pub fn delete_listing_mutation(
    transport: Arc<dyn Transport>,
) -> MutationController<DeleteListingData, DeleteListingVariables> {
    MutationController::new(transport, DELETE_LISTING)
}

/// The listings page: one query listing everything and one delete mutation.
pub struct ListingsPage {
    listings: QueryController<ListingsData>,
    delete: MutationController<DeleteListingData, DeleteListingVariables>,
}

impl ListingsPage {
    /// Creates both controllers; the listings query starts immediately.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            listings: QueryController::new(Arc::clone(&transport), listings_query()),
            delete: delete_listing_mutation(transport),
        }
    }

    /// Returns the listings query controller.
    #[must_use]
    pub const fn listings(&self) -> &QueryController<ListingsData> {
        &self.listings
    }

    /// Returns the delete mutation controller.
    #[must_use]
    pub const fn delete(&self) -> &MutationController<DeleteListingData, DeleteListingVariables> {
        &self.delete
    }

    /// Deletes a listing, then refetches the listings once it is gone.
    ///
    /// A failed delete is returned without refetching. A failed refetch is
    /// absorbed into the listings state like any other query failure.
    ///
    /// # Errors
    ///
    /// Returns the delete mutation's [`OperationError`].
    pub async fn delete_listing(&self, id: impl Into<String>) -> Result<DeletedListing, OperationError> {
        let deleted = self
            .delete
            .execute(DeleteListingVariables { id: id.into() })
            .await?;
        // The deletion already happened; a refetch failure only shows on the listings state.
        let _ = self.listings.refetch().await;
        Ok(deleted.delete_listing)
    }
}
